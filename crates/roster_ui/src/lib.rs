//! Activity roster page: rendering, page state and the load/mutate cycle.

pub mod controller;
pub mod notify;
pub mod page;
pub mod render;

pub use controller::{
    events::{EventOutcome, PageEvent},
    ControllerConfig, LoadOutcome, MutationOutcome, MutationStatus, RosterController,
};
pub use page::{Page, SharedPage};
