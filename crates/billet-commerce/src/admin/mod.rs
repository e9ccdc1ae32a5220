//! Admin back-office operations.

mod dashboard;
mod events;

pub use dashboard::{load_dashboard, DashboardSummary};
pub use events::{remove_event, save_event};
