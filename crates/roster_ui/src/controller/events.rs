//! Page events and how the controller routes them.

use tracing::debug;

use crate::page::ControlKey;

use super::{MutationOutcome, MutationStatus, RosterController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SelectActivity(String),
    EditEmail(String),
    SubmitSignup,
    ActivateUnregister(ControlKey),
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::SelectActivity(_) => "select_activity",
            PageEvent::EditEmail(_) => "edit_email",
            PageEvent::SubmitSignup => "submit_signup",
            PageEvent::ActivateUnregister(_) => "activate_unregister",
        }
    }
}

/// What the page should do with the originating event once the controller
/// is done with it.
#[derive(Debug)]
pub struct EventOutcome {
    /// The browser's own action for the event (form navigation) is suppressed.
    pub default_prevented: bool,
    /// The activation must not reach enclosing elements such as the card.
    pub propagation_stopped: bool,
    pub mutation: Option<MutationOutcome>,
}

impl EventOutcome {
    fn passive() -> Self {
        Self {
            default_prevented: false,
            propagation_stopped: false,
            mutation: None,
        }
    }

    pub fn mutation_status(&self) -> Option<MutationStatus> {
        self.mutation.as_ref().map(|mutation| mutation.status)
    }
}

impl RosterController {
    pub async fn handle_event(&self, event: PageEvent) -> EventOutcome {
        debug!(event = event.name(), "roster: dispatching page event");
        match event {
            PageEvent::SelectActivity(value) => {
                if !self.page.lock().await.selector.select(&value) {
                    debug!(value = %value, "roster: ignoring unknown activity option");
                }
                EventOutcome::passive()
            }
            PageEvent::EditEmail(email) => {
                self.page.lock().await.signup_form.set_email(email);
                EventOutcome::passive()
            }
            PageEvent::SubmitSignup => EventOutcome {
                default_prevented: true,
                propagation_stopped: false,
                mutation: Some(self.signup().await),
            },
            PageEvent::ActivateUnregister(control) => EventOutcome {
                default_prevented: false,
                propagation_stopped: true,
                mutation: Some(self.unregister(&control).await),
            },
        }
    }
}
