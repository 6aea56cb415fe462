//! Request signing seam.
//!
//! Authentication is applied to each fully built `reqwest::Request` right
//! before it is sent. The client does not know how a signature is made; it
//! only calls [`RequestSigner::sign`]. Two implementations ship with the
//! crate:
//!
//! - [`BearerToken`]: attaches `Authorization: Bearer <token>`.
//! - [`Unsigned`]: leaves the request untouched (local proxies, tests).
//!
//! Deployments that need a different scheme (HMAC request signing, mTLS
//! header injection, ...) implement the trait themselves and hand it to
//! [`EdgeClient::with_signer`](crate::client::EdgeClient::with_signer).

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::{EdgeError, Result};

/// Applies authentication to an outgoing request.
///
/// Implementations receive the request after the URL, method, headers and
/// JSON body have been set, so they can sign over any of them.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut reqwest::Request) -> Result<()>;
}

/// Static bearer token.
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: &str) -> Self {
        BearerToken {
            token: token.to_string(),
        }
    }
}

impl RequestSigner for BearerToken {
    fn sign(&self, request: &mut reqwest::Request) -> Result<()> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| EdgeError::Config {
                message: "access token contains characters not allowed in a header".to_string(),
                source: Some(Box::new(e)),
            })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// No-op signer.
pub struct Unsigned;

impl RequestSigner for Unsigned {
    fn sign(&self, _request: &mut reqwest::Request) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, Url};

    fn request() -> reqwest::Request {
        let url = Url::parse("https://host.example.net/appsec/v1/configs").unwrap();
        reqwest::Request::new(Method::GET, url)
    }

    #[test]
    fn bearer_token_sets_authorization_header() {
        let mut req = request();
        BearerToken::new("akab-token").sign(&mut req).unwrap();
        let header = req.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer akab-token");
        assert!(header.is_sensitive(), "token must not show up in debug output");
    }

    #[test]
    fn bearer_token_rejects_header_breaking_characters() {
        let mut req = request();
        let result = BearerToken::new("bad\ntoken").sign(&mut req);
        assert!(matches!(result, Err(EdgeError::Config { .. })));
    }

    #[test]
    fn unsigned_leaves_headers_alone() {
        let mut req = request();
        Unsigned.sign(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }
}
