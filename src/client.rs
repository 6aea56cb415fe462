//! HTTP client for the API.
//!
//! `EdgeClient` wraps a `reqwest::Client`, a base URL and a
//! [`RequestSigner`]. Endpoint modules never talk to reqwest directly;
//! they hand a method, a path and an optional JSON body to one of the
//! verb helpers here, which:
//!
//! 1. build the request and let the signer authenticate it,
//! 2. send it (transport faults become `EdgeError::Network`),
//! 3. read the body as text *before* judging the status, so the API's
//!    problem document survives into `EdgeError::Api`,
//! 4. check the status against the operation's success set,
//! 5. decode the JSON body into the caller's type.
//!
//! There is no retry path. Every call is one request.

use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::auth::{BearerToken, RequestSigner, Unsigned};
use crate::config::ClientConfig;
use crate::error::{EdgeError, Result};

/// Longest slice of an error body written to the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Status codes an operation treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// 200 only. Reads.
    Ok,
    /// 200 or 201. Updates that may create.
    OkOrCreated,
    /// Any 2xx. Fire-and-forget submissions.
    AnySuccess,
}

impl Expect {
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Expect::Ok => status == StatusCode::OK,
            Expect::OkOrCreated => status == StatusCode::OK || status == StatusCode::CREATED,
            Expect::AnySuccess => status.is_success(),
        }
    }
}

/// Authenticated HTTP client for the API.
///
/// `base_url` is a `String` so tests can point it at a wiremock server.
pub struct EdgeClient {
    client: Client,
    base_url: String,
    signer: Box<dyn RequestSigner>,
}

impl EdgeClient {
    /// Builds a client from resolved configuration. A configured access
    /// token selects [`BearerToken`] signing, otherwise requests go out
    /// unsigned.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let signer: Box<dyn RequestSigner> = match &config.access_token {
            Some(token) => Box::new(BearerToken::new(token)),
            None => Box::new(Unsigned),
        };
        Ok(EdgeClient {
            client: build_http_client(config)?,
            base_url: config.base_url(),
            signer,
        })
    }

    /// Builds a client with a caller-supplied signer.
    pub fn with_signer(config: &ClientConfig, signer: impl RequestSigner + 'static) -> Result<Self> {
        Ok(EdgeClient {
            client: build_http_client(config)?,
            base_url: config.base_url(),
            signer: Box::new(signer),
        })
    }

    /// Client pointed at an arbitrary base URL with default timeouts.
    /// Used by tests to target a local mock server.
    pub fn with_base_url(signer: impl RequestSigner + 'static, base_url: &str) -> Result<Self> {
        let config = ClientConfig::new(base_url);
        Self::with_signer(&config, signer)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the body text when the status is in
    /// `expect`'s success set.
    ///
    /// `path` is absolute (`/appsec/v1/...`) and is joined onto the base
    /// URL.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expect: Expect,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(payload) = body {
            builder = builder.json(payload);
        }
        let mut request = builder.build()?;
        self.signer.sign(&mut request)?;

        let response = self.client.execute(request).await?;

        let status = response.status();
        let text = response.text().await?;

        if !expect.accepts(status) {
            warn!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(EdgeError::api(status, text));
        }
        Ok(text)
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expect: Expect,
    ) -> Result<T> {
        let text = self.execute(method, path, body, expect).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET, expecting 200, decoding the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json::<T, ()>(Method::GET, path, None, Expect::Ok)
            .await
    }

    /// PUT with a JSON body, expecting 200 or 201, decoding the response.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(Method::PUT, path, Some(body), Expect::OkOrCreated)
            .await
    }

    /// POST with a JSON body, accepting any 2xx and discarding the
    /// response body.
    pub async fn post_accepted<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(Method::POST, path, Some(body), Expect::AnySuccess)
            .await
            .map(|_| ())
    }
}

fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("edge-api/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()?)
}

/// Reads an explicit JSON `null` as `T::default()`. Pair with
/// `#[serde(default)]` so a missing member behaves the same.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Truncates error bodies and strips control characters before logging.
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };
    truncated.replace(|c: char| c.is_control(), "")
}
