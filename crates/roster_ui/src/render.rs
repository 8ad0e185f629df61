//! Pure roster rendering: snapshot in, selector options and cards out.
//!
//! Nothing here touches the page. The loader installs a [`RosterView`] into
//! the page regions in one step, so the selector and the card list always
//! come from the same snapshot.

use std::fmt::Write as _;

use shared::domain::{participant_initials, ActivityName, ParticipantEmail, RosterSnapshot};

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const PARTICIPANTS_HEADING: &str = "Participants:";
pub const REMOVE_GLYPH: &str = "\u{2716}";

/// Escapes the five markup-significant characters. Every server-supplied
/// string goes through here before it reaches markup.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }

    fn for_activity(name: &ActivityName) -> Self {
        Self {
            value: name.as_str().to_string(),
            label: name.as_str().to_string(),
        }
    }
}

/// What an unregister control is bound to: the activity and the exact stored
/// email, never a row index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnregisterBinding {
    pub activity: ActivityName,
    pub email: ParticipantEmail,
}

impl UnregisterBinding {
    pub fn new(activity: impl Into<ActivityName>, email: impl Into<ParticipantEmail>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
        }
    }

    pub fn aria_label(&self) -> String {
        format!("Unregister {}", self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub initials: String,
    pub email: ParticipantEmail,
    pub unregister: UnregisterBinding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantSection {
    Empty,
    Rows(Vec<ParticipantRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: ActivityName,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: ParticipantSection,
}

impl ActivityCard {
    pub fn rows(&self) -> &[ParticipantRow] {
        match &self.participants {
            ParticipantSection::Empty => &[],
            ParticipantSection::Rows(rows) => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub options: Vec<SelectOption>,
    pub cards: Vec<ActivityCard>,
}

pub fn render_roster(snapshot: &RosterSnapshot) -> RosterView {
    let mut options = Vec::with_capacity(snapshot.len() + 1);
    options.push(SelectOption::placeholder());
    let mut cards = Vec::with_capacity(snapshot.len());

    for (name, activity) in snapshot.iter() {
        options.push(SelectOption::for_activity(name));

        let participants = if activity.participants.is_empty() {
            ParticipantSection::Empty
        } else {
            ParticipantSection::Rows(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        initials: participant_initials(email),
                        email: email.clone(),
                        unregister: UnregisterBinding::new(name.clone(), email.clone()),
                    })
                    .collect(),
            )
        };

        cards.push(ActivityCard {
            name: name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants,
        });
    }

    RosterView { options, cards }
}

pub fn option_markup(option: &SelectOption, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(&option.value),
        if selected { " selected" } else { "" },
        escape_html(&option.label)
    )
}

/// Markup for one card. `is_disabled` reports whether a row's unregister
/// control currently has a request in flight.
pub fn card_markup(card: &ActivityCard, is_disabled: impl Fn(&UnregisterBinding) -> bool) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="activity-card">"#);
    let _ = write!(
        html,
        "<h4>{}</h4><p>{}</p><p><strong>Schedule:</strong> {}</p>\
         <p><strong>Availability:</strong> {} spots left</p>",
        escape_html(card.name.as_str()),
        escape_html(&card.description),
        escape_html(&card.schedule),
        card.spots_left
    );

    match &card.participants {
        ParticipantSection::Empty => {
            let _ = write!(
                html,
                r#"<div class="participants empty">{NO_PARTICIPANTS}</div>"#
            );
        }
        ParticipantSection::Rows(rows) => {
            let _ = write!(
                html,
                r#"<div class="participants"><strong>{PARTICIPANTS_HEADING}</strong><ul>"#
            );
            for row in rows {
                let _ = write!(
                    html,
                    r#"<li><span class="participant-initials">{}</span><span>{}</span><button class="participant-remove" aria-label="{}" data-email="{}"{}>{REMOVE_GLYPH}</button></li>"#,
                    escape_html(&row.initials),
                    escape_html(&row.email),
                    escape_html(&row.unregister.aria_label()),
                    escape_html(&row.unregister.email),
                    if is_disabled(&row.unregister) {
                        " disabled"
                    } else {
                        ""
                    }
                );
            }
            html.push_str("</ul></div>");
        }
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
