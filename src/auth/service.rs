//! Auth service.

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::storage::{self, Storage, StorageKey};

use super::{AuthError, ProfileUpdate, UserProfile};

const DEMO_PHONE: &str = "+1 (555) 123-4567";
const DEMO_ADDRESS: &str = "123 Main St, Anytown, USA";

/// Simulated round-trip latency for each auth call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDelays {
    /// Delay before a login completes
    pub login: Duration,

    /// Delay before a signup completes
    pub signup: Duration,

    /// Delay before a profile update completes
    pub update_profile: Duration,
}

impl Default for AuthDelays {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            signup: Duration::from_millis(1000),
            update_profile: Duration::from_millis(500),
        }
    }
}

impl AuthDelays {
    /// No simulated latency.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            signup: Duration::ZERO,
            update_profile: Duration::ZERO,
        }
    }
}

/// Auth service backed by local storage.
#[derive(Debug)]
pub struct LocalAuthService {
    storage: Arc<dyn Storage>,
    user: RwLock<Option<UserProfile>>,
    delays: AuthDelays,
}

impl LocalAuthService {
    /// Restore any signed-in user from storage.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>, delays: AuthDelays) -> Self {
        let user: Option<UserProfile> = storage::load_or_default(&*storage, StorageKey::User);

        Self {
            storage,
            user: RwLock::new(user),
            delays,
        }
    }

    fn sign_in(&self, profile: UserProfile) -> Result<UserProfile, AuthError> {
        storage::save(&*self.storage, StorageKey::User, &profile)?;

        info!(user_id = %profile.id, "signed in");

        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());

        Ok(profile)
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn new_user_id() -> String {
    format!("user-{}", Timestamp::now().as_millisecond())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[async_trait]
impl AuthService for LocalAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        simulate_latency(self.delays.login).await;

        if is_blank(email) || is_blank(password) {
            return Err(AuthError::MissingCredentials);
        }

        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email);

        self.sign_in(UserProfile {
            id: new_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            phone: DEMO_PHONE.to_string(),
            address: DEMO_ADDRESS.to_string(),
        })
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        simulate_latency(self.delays.signup).await;

        if is_blank(name) || is_blank(email) || is_blank(password) {
            return Err(AuthError::MissingSignupDetails);
        }

        self.sign_in(UserProfile {
            id: new_user_id(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: String::new(),
            address: String::new(),
        })
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, AuthError> {
        simulate_latency(self.delays.update_profile).await;

        let mut profile = self.current_user().ok_or(AuthError::NotSignedIn)?;
        update.apply_to(&mut profile);

        storage::save(&*self.storage, StorageKey::User, &profile)?;

        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());

        Ok(profile)
    }

    fn logout(&self) {
        let previous = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Err(error) = self.storage.remove(StorageKey::User) {
            warn!(%error, "failed to clear stored user");
        }

        if let Some(user) = previous {
            info!(user_id = %user.id, "signed out");
        }
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Sign-in and profile management.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in with an email and password.
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    /// Create an account and sign in.
    async fn signup(&self, name: &str, email: &str, password: &str)
    -> Result<UserProfile, AuthError>;

    /// Change fields of the signed-in user's profile.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, AuthError>;

    /// Sign out and forget the stored profile.
    fn logout(&self);

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserProfile>;
}
