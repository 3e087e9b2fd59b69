//! Generic JSON-over-HTTP client for the dashboard API.
//!
//! Status contract: `200`/`201` carry a JSON body, `204` carries none, every
//! other status carries an error payload `{code, message}`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use blitzware_core::config::ApiConfig;
use blitzware_core::ErrorBody;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::tracker::{RequestId, RequestTracker};

/// Header carrying the static client identifier.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

enum Payload {
    Empty,
    Json(Vec<u8>),
    Multipart(reqwest::multipart::Form),
}

/// Dashboard API client.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
    tracker: RequestTracker,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::Config("base_url is empty".into()));
        }
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("Invalid base_url: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url must be an http(s) URL: {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client_id = HeaderValue::from_str(&config.client_id)
            .map_err(|_| ClientError::Config("Invalid client_id format".into()))?;
        headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), client_id);

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
            tracker: RequestTracker::new(config.tracked_requests),
        })
    }

    /// Absolute URL for an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Config("base_url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Replace the bearer token sent with every request.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub const fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    // =========================================================================
    // Typed verbs
    // =========================================================================

    /// `GET`, decoding the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ClientError> {
        self.execute(Method::GET, endpoint, Ok(Payload::Empty), decode_json)
            .await
    }

    /// `POST` a JSON body, decoding the JSON response.
    pub async fn post_json<B, T>(&self, endpoint: &Endpoint, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, endpoint, encode_json(body), decode_json)
            .await
    }

    /// `POST` a JSON body where only the status matters.
    pub async fn post_json_status<B>(&self, endpoint: &Endpoint, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, endpoint, encode_json(body), ignore_body)
            .await
    }

    /// `PUT` a JSON body. Any success status counts; the body is ignored.
    pub async fn put_json<B>(&self, endpoint: &Endpoint, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, endpoint, encode_json(body), ignore_body)
            .await
    }

    /// `DELETE`. Any success status counts; the body is ignored.
    pub async fn delete(&self, endpoint: &Endpoint) -> Result<(), ClientError> {
        self.execute(Method::DELETE, endpoint, Ok(Payload::Empty), ignore_body)
            .await
    }

    /// `POST` a multipart form, decoding the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        self.execute(Method::POST, endpoint, Ok(Payload::Multipart(form)), decode_json)
            .await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn execute<T>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        payload: Result<Payload, ClientError>,
        decode: fn(StatusCode, &[u8]) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let id = self.tracker.begin(format!("{method} {endpoint}")).await;
        let result = self.round_trip(id, method, endpoint, payload, decode).await;
        self.tracker.finish(id, result.as_ref().err()).await;
        result
    }

    async fn round_trip<T>(
        &self,
        id: RequestId,
        method: Method,
        endpoint: &Endpoint,
        payload: Result<Payload, ClientError>,
        decode: fn(StatusCode, &[u8]) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let payload = payload?;
        let url = self.url(endpoint)?;

        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        request = match payload {
            Payload::Empty => request,
            Payload::Json(bytes) => request
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            Payload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        self.tracker.mark_sent(id).await;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            request = %id,
            %method,
            path = %endpoint,
            status = status.as_u16(),
            len = bytes.len(),
            "API response"
        );

        if !is_success(status) {
            let body = decode_error_body(status, &bytes);
            warn!(
                request = %id,
                %method,
                path = %endpoint,
                status = status.as_u16(),
                code = %body.code,
                message = %body.message,
                "API returned error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        decode(status, &bytes)
    }
}

/// `200`, `201` and `204` are the only success statuses the API uses.
pub(crate) const fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 204)
}

/// Decode an error payload, synthesising one from the status when the body
/// is empty or not `{code, message}`.
pub(crate) fn decode_error_body(status: StatusCode, bytes: &[u8]) -> ErrorBody {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| ErrorBody::from_status(status.as_u16(), status.canonical_reason()))
}

fn encode_json<B: Serialize + ?Sized>(body: &B) -> Result<Payload, ClientError> {
    Ok(Payload::Json(serde_json::to_vec(body)?))
}

fn decode_json<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ClientError> {
    if status == StatusCode::NO_CONTENT {
        warn!("expected a JSON body but the server answered 204");
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[allow(clippy::unnecessary_wraps)]
const fn ignore_body(_status: StatusCode, _bytes: &[u8]) -> Result<(), ClientError> {
    Ok(())
}
