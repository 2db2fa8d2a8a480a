// Request extractors shared by handlers

pub mod registration;
pub mod session;

pub use registration::RegistrationSubmission;
pub use session::{CurrentUser, RequireUser};
