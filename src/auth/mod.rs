//! Authentication
//!
//! A stand-in for a real identity provider: any non-empty credentials sign in.

use thiserror::Error;

use crate::storage::StorageError;

mod models;
mod service;

pub use models::*;
pub use service::*;

/// Auth service errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// Name, email or password was blank.
    #[error("name, email and password are required")]
    MissingSignupDetails,

    /// The action needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// The profile could not be saved.
    #[error("failed to save user profile")]
    Storage(#[from] StorageError),
}
