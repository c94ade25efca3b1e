pub mod dispatch_service;
pub mod notifier;
pub mod telegram;

pub use dispatch_service::{DispatchOutcome, DispatchService};
pub use notifier::{Notifier, SendError};
pub use telegram::TelegramNotifier;
