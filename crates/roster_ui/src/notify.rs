//! Single-slot notification region with fire-and-forget hide timers.

use std::time::Duration;

use crate::page::SharedPage;

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Success,
    Error,
}

impl Polarity {
    pub fn class(self) -> &'static str {
        match self {
            Polarity::Success => "success",
            Polarity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRegion {
    text: String,
    polarity: Option<Polarity>,
    hidden: bool,
}

impl Default for NotificationRegion {
    fn default() -> Self {
        Self {
            text: String::new(),
            polarity: None,
            hidden: true,
        }
    }
}

impl NotificationRegion {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn polarity(&self) -> Option<Polarity> {
        self.polarity
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn class_name(&self) -> String {
        let mut class = match self.polarity {
            Some(polarity) => format!("message {}", polarity.class()),
            None => String::new(),
        };
        if self.hidden {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str("hidden");
        }
        class
    }

    fn show(&mut self, text: String, polarity: Polarity) {
        self.text = text;
        self.polarity = Some(polarity);
        self.hidden = false;
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    hide_after: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}

impl Notifier {
    pub fn new(hide_after: Duration) -> Self {
        Self { hide_after }
    }

    /// Replaces whatever the region shows and schedules its own hide. Earlier
    /// timers stay armed and will hide this message if they fire first.
    pub fn show(
        &self,
        page: &SharedPage,
        region: &mut NotificationRegion,
        text: impl Into<String>,
        polarity: Polarity,
    ) {
        region.show(text.into(), polarity);

        let page = page.clone();
        let hide_after = self.hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            page.lock().await.notification.hide();
        });
    }
}
