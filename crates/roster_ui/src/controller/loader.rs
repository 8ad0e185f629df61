use tracing::{error, info};

use crate::render::render_roster;

use super::{LoadOutcome, RosterController};

impl RosterController {
    /// Fetches the whole roster and rebuilds the selector and the card list
    /// from it. One attempt; on failure only the list is replaced.
    pub async fn load(&self) -> LoadOutcome {
        match self.api.fetch_roster().await {
            Ok(snapshot) => {
                let view = render_roster(&snapshot);
                let activities = view.cards.len();
                self.page.lock().await.install(view);
                info!(activities, "roster: rendered activities");
                LoadOutcome::Rendered { activities }
            }
            Err(err) => {
                error!(error = %err, "roster: failed to load activities");
                self.page.lock().await.show_load_failure();
                LoadOutcome::Failed
            }
        }
    }
}
