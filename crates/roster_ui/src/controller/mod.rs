//! Controller layer: roster loading, mutation dispatch and page events.

use std::{sync::Arc, time::Duration};

use roster_client::RosterApi;
use tokio::task::JoinHandle;

use crate::{
    notify::{Notifier, DEFAULT_HIDE_DELAY},
    page::{Page, SharedPage},
};

pub mod dispatcher;
pub mod events;
pub mod loader;

#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub notification_hide_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            notification_hide_delay: DEFAULT_HIDE_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { activities: usize },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// 2xx reply; a reload was started.
    Succeeded,
    /// Non-2xx reply carrying the server's verdict.
    Rejected,
    /// Transport or parse failure.
    Failed,
    /// The trigger was disabled, detached, or the form was incomplete; no
    /// request was sent.
    Ignored,
}

#[derive(Debug)]
pub struct MutationOutcome {
    pub status: MutationStatus,
    /// The reload started by a successful mutation. It runs on its own; the
    /// handle only lets a host wait for it.
    pub reload: Option<JoinHandle<LoadOutcome>>,
}

impl MutationOutcome {
    fn settled(status: MutationStatus) -> Self {
        Self {
            status,
            reload: None,
        }
    }

    pub async fn wait_for_reload(self) -> Option<LoadOutcome> {
        match self.reload {
            Some(handle) => handle.await.ok(),
            None => None,
        }
    }
}

#[derive(Clone)]
pub struct RosterController {
    api: Arc<dyn RosterApi>,
    page: SharedPage,
    notifier: Notifier,
}

impl RosterController {
    pub fn new(api: Arc<dyn RosterApi>, config: ControllerConfig) -> Self {
        Self::with_page(api, Page::shared(), config)
    }

    pub fn with_page(api: Arc<dyn RosterApi>, page: SharedPage, config: ControllerConfig) -> Self {
        Self {
            api,
            page,
            notifier: Notifier::new(config.notification_hide_delay),
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Startup: one roster load.
    pub async fn start(&self) -> LoadOutcome {
        self.load().await
    }

    fn spawn_reload(&self) -> JoinHandle<LoadOutcome> {
        let controller = self.clone();
        tokio::spawn(async move { controller.load().await })
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
