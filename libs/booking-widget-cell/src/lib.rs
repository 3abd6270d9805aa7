pub mod handlers;
pub mod router;
pub mod models;
pub mod services;
pub mod wizard;

pub use models::*;
pub use services::*;
pub use wizard::{BookingDraft, BookingWizard, WizardError, WizardStep};
