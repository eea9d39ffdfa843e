//! `/users` endpoints: register, login, and profile.

use bikeshop_core::{AuthResponse, User};
use reqwest::Method;
use serde::Serialize;

use crate::client::{unwrap_entity, ApiClient};
use crate::error::ClientError;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fields to change on `PUT /users/profile`; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the registration
    /// (its `message` is preserved), or transport/deserialize errors.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ClientError> {
        self.send_json(Method::POST, "users/register", registration)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] on bad credentials, or transport/deserialize errors.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ClientError> {
        self.send_json(Method::POST, "users/login", credentials).await
    }

    /// Fetches the profile of the user owning the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (typically 401) when the token is stale.
    pub async fn profile(&self) -> Result<User, ClientError> {
        let value: serde_json::Value = self.get_json("users/profile", None).await?;
        unwrap_entity(value, "user", "users/profile")
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the update.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        let value: serde_json::Value = self
            .send_json(Method::PUT, "users/profile", update)
            .await?;
        unwrap_entity(value, "user", "users/profile")
    }
}
