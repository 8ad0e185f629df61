//! Page model: the regions the controller rewrites, held in one struct that
//! is created at startup and shared by the loader, dispatcher and notifier.

use std::{collections::HashSet, sync::Arc};

use shared::domain::ActivityName;
use tokio::sync::Mutex;

use crate::{
    notify::NotificationRegion,
    render::{
        card_markup, escape_html, option_markup, ActivityCard, ParticipantRow, RosterView,
        SelectOption, UnregisterBinding,
    },
};

pub const LOADING_NOTICE: &str = "Loading activities...";
pub const LOAD_FAILURE_NOTICE: &str = "Failed to load activities. Please try again later.";

pub type SharedPage = Arc<Mutex<Page>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterListContent {
    Loading,
    Cards(Vec<ActivityCard>),
    Failure,
}

/// Identifies one rendered unregister control. The generation changes every
/// time the list is replaced, so a key from an older render never matches a
/// newer control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlKey {
    pub generation: u64,
    pub binding: UnregisterBinding,
}

#[derive(Debug, Clone)]
pub struct RosterListRegion {
    content: RosterListContent,
    generation: u64,
    disabled: HashSet<UnregisterBinding>,
}

impl Default for RosterListRegion {
    fn default() -> Self {
        Self {
            content: RosterListContent::Loading,
            generation: 0,
            disabled: HashSet::new(),
        }
    }
}

impl RosterListRegion {
    pub fn content(&self) -> &RosterListContent {
        &self.content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match &self.content {
            RosterListContent::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn card(&self, name: &ActivityName) -> Option<&ActivityCard> {
        self.cards().iter().find(|card| &card.name == name)
    }

    /// Keys for every unregister control currently on screen, in render order.
    pub fn controls(&self) -> Vec<ControlKey> {
        self.cards()
            .iter()
            .flat_map(|card| card.rows())
            .map(|row| ControlKey {
                generation: self.generation,
                binding: row.unregister.clone(),
            })
            .collect()
    }

    pub fn control(&self, key: &ControlKey) -> Option<&ParticipantRow> {
        if key.generation != self.generation {
            return None;
        }
        self.card(&key.binding.activity)?
            .rows()
            .iter()
            .find(|row| row.unregister == key.binding)
    }

    pub fn is_disabled(&self, binding: &UnregisterBinding) -> bool {
        self.disabled.contains(binding)
    }

    fn replace(&mut self, content: RosterListContent) {
        self.content = content;
        self.generation += 1;
        // Fresh controls start enabled.
        self.disabled.clear();
    }

    /// Disables a rendered, enabled control. Returns false when the control
    /// is gone or already disabled.
    pub(crate) fn disable(&mut self, key: &ControlKey) -> bool {
        if self.control(key).is_none() {
            return false;
        }
        self.disabled.insert(key.binding.clone())
    }

    pub(crate) fn enable(&mut self, key: &ControlKey) {
        if key.generation == self.generation {
            self.disabled.remove(&key.binding);
        }
    }

    fn to_html(&self) -> String {
        let inner = match &self.content {
            RosterListContent::Loading => format!("<p>{LOADING_NOTICE}</p>"),
            RosterListContent::Failure => format!("<p>{LOAD_FAILURE_NOTICE}</p>"),
            RosterListContent::Cards(cards) => cards
                .iter()
                .map(|card| card_markup(card, |binding| self.is_disabled(binding)))
                .collect(),
        };
        format!(r#"<div id="activities-list">{inner}</div>"#)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRegion {
    options: Vec<SelectOption>,
    selected: String,
}

impl Default for SelectorRegion {
    fn default() -> Self {
        Self {
            options: vec![SelectOption::placeholder()],
            selected: String::new(),
        }
    }
}

impl SelectorRegion {
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Selects an existing option by value; unknown values are refused.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|option| option.value == value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    // Rebuilding the options falls back to the first entry, the placeholder.
    fn replace(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.selected = String::new();
    }

    fn to_html(&self) -> String {
        let inner: String = self
            .options
            .iter()
            .map(|option| option_markup(option, option.value == self.selected))
            .collect();
        format!(r#"<select id="activity" required>{inner}</select>"#)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    email: String,
    submitting: bool,
}

impl SignupForm {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub roster_list: RosterListRegion,
    pub selector: SelectorRegion,
    pub notification: NotificationRegion,
    pub signup_form: SignupForm,
}

impl Page {
    pub fn shared() -> SharedPage {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Installs both halves of one render pass.
    pub fn install(&mut self, view: RosterView) {
        self.selector.replace(view.options);
        self.roster_list
            .replace(RosterListContent::Cards(view.cards));
    }

    /// Load failure: the list shows the notice, the selector is left alone.
    pub fn show_load_failure(&mut self) {
        self.roster_list.replace(RosterListContent::Failure);
    }

    /// Values the form would submit, or `None` while a required field is
    /// blank.
    pub fn signup_values(&self) -> Option<(ActivityName, String)> {
        let activity = self.selector.selected();
        let email = self.signup_form.email();
        if activity.is_empty() || email.is_empty() {
            return None;
        }
        Some((ActivityName::from(activity), email.to_string()))
    }

    pub fn reset_signup_form(&mut self) {
        self.signup_form.email.clear();
        self.selector.selected.clear();
    }

    pub fn to_html(&self) -> String {
        let message = format!(
            r#"<div id="message" class="{}">{}</div>"#,
            self.notification.class_name(),
            escape_html(self.notification.text())
        );
        let form = format!(
            r#"<form id="signup-form"><input type="email" id="email" required value="{}">{}<button type="submit"{}>Sign Up</button></form>"#,
            escape_html(self.signup_form.email()),
            self.selector.to_html(),
            if self.signup_form.is_submitting() {
                " disabled"
            } else {
                ""
            }
        );
        format!("{}\n{}\n{}", self.roster_list.to_html(), form, message)
    }
}
