pub mod api;
pub mod client;
pub mod error;
pub mod loading;
pub mod payload;
pub mod token_store;

pub use api::users::{Credentials, ProfileUpdate, Registration};
pub use client::ApiClient;
pub use error::ClientError;
pub use loading::{LoadingTracker, PendingRequest, LOADING_MESSAGE};
pub use payload::{FileUpload, FormPayload, FormValue};
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};
