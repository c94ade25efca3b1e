pub mod reconciliation_model;
pub mod reconciliation_service;

pub use reconciliation_model::{CycleSummary, PendingNotification};
pub use reconciliation_service::ReconciliationService;
