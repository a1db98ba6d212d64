//! Authenticated HTTP client.

use super::{BearerToken, check_response};
use crate::config::ApiSettings;
use crate::error::{ApiError, ApiResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// REST client bound to one service base URL and credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    credential: Option<BearerToken>,
    http: Client,
}

impl ApiClient {
    /// Builds a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self {
            base_url: settings.base_url.trim().trim_end_matches('/').to_owned(),
            credential: settings.token.clone().and_then(BearerToken::new),
            http,
        })
    }

    /// Replaces the bearer credential.
    #[must_use]
    pub fn with_credential(mut self, credential: BearerToken) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether a credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Resolves a service path against the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts an authenticated request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without touching the network
    /// when no credential is configured.
    pub fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(ApiError::Unauthenticated)?;
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(credential.expose()))
    }

    /// Sends a prepared request and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the request cannot be sent and
    /// the classified error for non-success statuses.
    pub async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request = builder.build().map_err(ApiError::transport)?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();
        let response = self.http.execute(request).await.map_err(|err| {
            tracing::warn!(%method, %path, error = %err, "api request failed");
            ApiError::transport(err)
        })?;
        tracing::debug!(
            %method,
            %path,
            status = response.status().as_u16(),
            "api response"
        );
        check_response(response).await
    }

    /// Issues a `GET` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body cannot be
    /// decoded.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.request(Method::GET, path)?).await?;
        decode_json(response).await
    }

    /// Sends a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the body cannot be
    /// decoded.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        let response = self.execute(builder).await?;
        decode_json(response).await
    }

    /// Issues a `DELETE`, discarding any body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}

/// Decodes a JSON response body.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the body cannot be read and
/// [`ApiError::Decode`] when it is not the expected shape.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await.map_err(ApiError::transport)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}
