//! HTTP client for the storefront REST API.
//!
//! Wraps `reqwest` with bearer-token injection from a [`TokenStore`],
//! server-message extraction on non-2xx responses, and the global
//! [`LoadingTracker`]. Nothing is retried: a failed call is reported once and
//! the caller decides what to show.

use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use bikeshop_core::QueryParams;

use crate::error::{extract_server_message, ClientError};
use crate::loading::LoadingTracker;
use crate::payload::FormPayload;
use crate::token_store::TokenStore;

/// Client for the storefront API.
///
/// Cheap to share behind an `Arc`; the session stores and the CLI all hold
/// the same instance so they observe one token and one pending counter.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    loading: LoadingTracker,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.token().is_some())
            .field("pending", &self.loading.pending())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
            loading: LoadingTracker::new(),
        })
    }

    /// Client with default timeout and user agent, for tests against a mock server.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn with_base_url(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        Self::new(base_url, 30, "bikeshop-test/0.1", tokens)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<T, ClientError> {
        let mut request = self.client.get(self.url(path));
        if let Some(query) = query {
            request = request.query(query.as_pairs());
        }
        let body = self.execute(Method::GET, path, request).await?;
        parse_body(&body, path)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .request(method.clone(), self.url(path))
            .json(payload);
        let body = self.execute(method, path, request).await?;
        parse_body(&body, path)
    }

    pub(crate) async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        payload: FormPayload,
    ) -> Result<String, ClientError> {
        let form = payload.into_multipart()?;
        let request = self
            .client
            .request(method.clone(), self.url(path))
            .multipart(form);
        self.execute(method, path, request).await
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<String, ClientError> {
        let request = self.client.request(method.clone(), self.url(path));
        self.execute(method, path, request).await
    }

    /// Attaches the bearer token, counts the request as pending until it
    /// settles, and maps non-2xx statuses to [`ClientError::Api`].
    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, ClientError> {
        let _pending = self.loading.begin();
        let request = match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        tracing::debug!(%method, path, pending = self.loading.pending(), "api request");

        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_server_message(&body);
            tracing::debug!(%method, path, status = status.as_u16(), ?message, "api request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                url,
                message,
            });
        }
        Ok(body)
    }
}

/// Everything except unreserved characters, so `/`, `?` and `#` in an id
/// stay inside its path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds `resource/<id>` with `id` encoded as one path segment.
pub(crate) fn entity_path(resource: &str, id: &str) -> Result<String, ClientError> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(ClientError::InvalidId { id: id.to_owned() });
    }
    Ok(format!("{resource}/{}", utf8_percent_encode(id, PATH_SEGMENT)))
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Unwraps an entity that the API returns either bare or wrapped under `key`
/// (e.g. `{"product": {...}}`).
pub(crate) fn unwrap_entity<T: DeserializeOwned>(
    value: serde_json::Value,
    key: &str,
    context: &str,
) -> Result<T, ClientError> {
    let inner = match value.get(key) {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };
    serde_json::from_value(inner).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::with_base_url(base_url, Arc::new(MemoryTokenStore::new()))
            .expect("client construction should not fail")
    }

    #[test]
    fn url_joins_base_and_path_with_one_slash() {
        let client = test_client("http://localhost:5000/api/");
        assert_eq!(client.url("/products"), "http://localhost:5000/api/products");
        assert_eq!(client.url("cart/abc"), "http://localhost:5000/api/cart/abc");
    }

    #[test]
    fn entity_path_keeps_the_id_in_one_segment() {
        assert_eq!(entity_path("products", "p1").unwrap(), "products/p1");
        assert_eq!(
            entity_path("accessories", "../users/profile").unwrap(),
            "accessories/..%2Fusers%2Fprofile"
        );
        assert_eq!(entity_path("cart", "i1?x=1#top").unwrap(), "cart/i1%3Fx%3D1%23top");
        assert!(matches!(
            entity_path("cart", ".."),
            Err(ClientError::InvalidId { .. })
        ));
        assert!(entity_path("products", "").is_err());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = ApiClient::with_base_url("not a url", Arc::new(MemoryTokenStore::new()));
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn unwrap_entity_accepts_keyed_or_bare_body() {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }

        let wrapped: Named =
            unwrap_entity(serde_json::json!({"product": {"name": "T2"}}), "product", "test")
                .unwrap();
        assert_eq!(wrapped.name, "T2");

        let bare: Named =
            unwrap_entity(serde_json::json!({"name": "C22"}), "product", "test").unwrap();
        assert_eq!(bare.name, "C22");
    }
}
