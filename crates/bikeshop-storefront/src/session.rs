//! Signed-in user and the persisted bearer token.
//!
//! The token lives in the client's [`TokenStore`]; this store keeps the user
//! record next to it and publishes changes on a `watch` channel so views can
//! follow sign-in and sign-out.

use std::sync::Arc;

use bikeshop_client::{ApiClient, Credentials, ProfileUpdate, Registration, StoredSession};
use bikeshop_core::{AuthResponse, User};
use tokio::sync::watch;

use crate::error::ActionError;

pub const ADMIN_ACCESS_DENIED: &str = "Access denied. Admin privileges required.";

#[derive(Debug)]
pub struct SessionStore {
    client: Arc<ApiClient>,
    user: watch::Sender<Option<User>>,
}

impl SessionStore {
    /// Creates the store. The user persisted alongside the token, if any, is
    /// shown until [`SessionStore::restore`] confirms it with the server.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        let cached = client.tokens().load().and_then(|session| session.user);
        let (user, _rx) = watch::channel(cached);
        Self { client, user }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.borrow().as_ref().is_some_and(User::is_admin)
    }

    /// Re-validates a persisted token by fetching the profile.
    ///
    /// Any failure clears the token and leaves the session anonymous.
    pub async fn restore(&self) -> Option<User> {
        let token = self.client.tokens().token()?;

        match self.client.profile().await {
            Ok(user) => {
                let session = StoredSession {
                    token,
                    user: Some(user.clone()),
                };
                if let Err(e) = self.client.tokens().save(&session) {
                    tracing::warn!(error = %e, "could not persist restored session");
                }
                self.user.send_replace(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session rejected; signing out");
                self.forget();
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns the server's message, or `"Login failed"`.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ActionError> {
        let credentials = Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let auth = self
            .client
            .login(&credentials)
            .await
            .map_err(|e| ActionError::from_client(&e, "Login failed"))?;
        self.accept(auth)
    }

    /// # Errors
    ///
    /// Returns the server's message, or `"Registration failed"`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ActionError> {
        let registration = Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let auth = self
            .client
            .register(&registration)
            .await
            .map_err(|e| ActionError::from_client(&e, "Registration failed"))?;
        self.accept(auth)
    }

    /// Logs in and then requires the admin role.
    ///
    /// A non-admin account stays signed in as a customer, matching the
    /// storefront login.
    ///
    /// # Errors
    ///
    /// Returns the login failure, or [`ADMIN_ACCESS_DENIED`] for non-admins.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<User, ActionError> {
        let user = self.login(email, password).await?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(ActionError::new(ADMIN_ACCESS_DENIED))
        }
    }

    /// Clears the persisted token and the in-memory user.
    pub fn logout(&self) {
        self.forget();
    }

    /// # Errors
    ///
    /// Returns the server's message, or `"Failed to update profile"`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ActionError> {
        let user = self
            .client
            .update_profile(update)
            .await
            .map_err(|e| ActionError::from_client(&e, "Failed to update profile"))?;

        if let Some(token) = self.client.tokens().token() {
            let session = StoredSession {
                token,
                user: Some(user.clone()),
            };
            if let Err(e) = self.client.tokens().save(&session) {
                tracing::warn!(error = %e, "could not persist updated profile");
            }
        }
        self.user.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn accept(&self, auth: AuthResponse) -> Result<User, ActionError> {
        let session = StoredSession {
            token: auth.token,
            user: Some(auth.user.clone()),
        };
        self.client.tokens().save(&session).map_err(|e| {
            tracing::warn!(error = %e, "could not persist session");
            ActionError::new("Could not save your session")
        })?;
        self.user.send_replace(Some(auth.user.clone()));
        Ok(auth.user)
    }

    fn forget(&self) {
        if let Err(e) = self.client.tokens().clear() {
            tracing::warn!(error = %e, "could not remove persisted session");
        }
        self.user.send_replace(None);
    }
}
