// Authentication collaborator
// Credential checks, password hashing and session tokens

pub mod authenticate;
pub mod password;
pub mod session;

pub use authenticate::{authenticate, AuthError};
