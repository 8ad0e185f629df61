use tracing::{debug, error, info, warn};

use crate::{
    notify::Polarity,
    page::{ControlKey, Page, SharedPage},
};

use super::{MutationOutcome, MutationStatus, RosterController};

pub const SIGNUP_SUCCESS_FALLBACK: &str = "Signed up successfully";
pub const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to remove participant";

fn unregister_success_fallback(email: &str) -> String {
    format!("Removed {email}")
}

/// The control a mutation disabled while its request is in flight.
enum Trigger {
    Submit,
    Unregister(ControlKey),
}

impl Trigger {
    fn enable(&self, page: &mut Page) {
        match self {
            Trigger::Submit => page.signup_form.set_submitting(false),
            Trigger::Unregister(key) => page.roster_list.enable(key),
        }
    }
}

/// Re-enables the trigger when the mutation settles or when its future is
/// dropped mid-request, so an abandoned call never leaves a control stuck.
struct TriggerGuard {
    page: SharedPage,
    trigger: Option<Trigger>,
}

impl TriggerGuard {
    fn new(page: SharedPage, trigger: Trigger) -> Self {
        Self {
            page,
            trigger: Some(trigger),
        }
    }

    fn release(mut self, page: &mut Page) {
        if let Some(trigger) = self.trigger.take() {
            trigger.enable(page);
        }
    }
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        let Some(trigger) = self.trigger.take() else {
            return;
        };
        debug!("roster: mutation dropped before settling, re-enabling trigger");
        if let Ok(mut page) = self.page.try_lock() {
            trigger.enable(&mut page);
            return;
        }
        // Page is held elsewhere; finish once the holder lets go.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let page = self.page.clone();
                handle.spawn(async move {
                    trigger.enable(&mut *page.lock().await);
                });
            }
            Err(_) => warn!("roster: no runtime to re-enable a dropped mutation trigger"),
        }
    }
}

impl RosterController {
    /// Submits the signup form. The submit control stays disabled until the
    /// reply is handled; a success clears the form and starts a reload.
    pub async fn signup(&self) -> MutationOutcome {
        let (activity, email, guard) = {
            let mut page = self.page.lock().await;
            if page.signup_form.is_submitting() {
                return MutationOutcome::settled(MutationStatus::Ignored);
            }
            let Some(values) = page.signup_values() else {
                return MutationOutcome::settled(MutationStatus::Ignored);
            };
            page.signup_form.set_submitting(true);
            let (activity, email) = values;
            (
                activity,
                email,
                TriggerGuard::new(self.page.clone(), Trigger::Submit),
            )
        };

        let result = self.api.signup(&activity, &email).await;

        let mut page = self.page.lock().await;
        let outcome = match result {
            Ok(reply) if reply.is_success() => {
                info!(activity = %activity, email = %email, status = reply.status, "roster: signup accepted");
                page.reset_signup_form();
                let text = reply
                    .body
                    .message
                    .unwrap_or_else(|| SIGNUP_SUCCESS_FALLBACK.to_string());
                self.notifier
                    .show(&self.page, &mut page.notification, text, Polarity::Success);
                MutationOutcome {
                    status: MutationStatus::Succeeded,
                    reload: Some(self.spawn_reload()),
                }
            }
            Ok(reply) => {
                warn!(activity = %activity, email = %email, status = reply.status, "roster: signup rejected");
                let text = reply
                    .body
                    .detail
                    .unwrap_or_else(|| SIGNUP_REJECTED_FALLBACK.to_string());
                self.notifier
                    .show(&self.page, &mut page.notification, text, Polarity::Error);
                MutationOutcome::settled(MutationStatus::Rejected)
            }
            Err(err) => {
                error!(activity = %activity, error = %err, "roster: error signing up");
                self.notifier
                    .show(&self.page, &mut page.notification, SIGNUP_FAILED, Polarity::Error);
                MutationOutcome::settled(MutationStatus::Failed)
            }
        };
        guard.release(&mut page);
        outcome
    }

    /// Activates one participant's unregister control. The request carries
    /// the email exactly as the server stored it.
    pub async fn unregister(&self, control: &ControlKey) -> MutationOutcome {
        if !self.page.lock().await.roster_list.disable(control) {
            return MutationOutcome::settled(MutationStatus::Ignored);
        }
        let guard = TriggerGuard::new(self.page.clone(), Trigger::Unregister(control.clone()));

        let binding = &control.binding;
        let result = self
            .api
            .unregister(&binding.activity, &binding.email)
            .await;

        let mut page = self.page.lock().await;
        let outcome = match result {
            Ok(reply) if reply.is_success() => {
                info!(activity = %binding.activity, email = %binding.email, status = reply.status, "roster: participant removed");
                let text = reply
                    .body
                    .message
                    .unwrap_or_else(|| unregister_success_fallback(&binding.email));
                self.notifier
                    .show(&self.page, &mut page.notification, text, Polarity::Success);
                MutationOutcome {
                    status: MutationStatus::Succeeded,
                    reload: Some(self.spawn_reload()),
                }
            }
            Ok(reply) => {
                warn!(activity = %binding.activity, email = %binding.email, status = reply.status, "roster: unregister rejected");
                let text = reply
                    .body
                    .detail
                    .unwrap_or_else(|| UNREGISTER_FAILED.to_string());
                self.notifier
                    .show(&self.page, &mut page.notification, text, Polarity::Error);
                MutationOutcome::settled(MutationStatus::Rejected)
            }
            Err(err) => {
                error!(activity = %binding.activity, error = %err, "roster: error removing participant");
                self.notifier.show(
                    &self.page,
                    &mut page.notification,
                    UNREGISTER_FAILED,
                    Polarity::Error,
                );
                MutationOutcome::settled(MutationStatus::Failed)
            }
        };
        guard.release(&mut page);
        outcome
    }
}
