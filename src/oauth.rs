//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use sha1::Sha1;
use uuid::Uuid;

use crate::config::Credentials;
use crate::error::{TwitterError, TwitterResult};
use crate::methods::HttpMethod;

/// Everything but the RFC 3986 unreserved characters: ALPHA / DIGIT / "-" / "." / "_" / "~"
const OAUTH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: Credentials,
}

impl OAuthSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn consumer_key(&self) -> &str {
        &self.credentials.consumer_key
    }

    /// Builds the `Authorization` header for a request.
    ///
    /// `url` must not carry a query string; `params` are the query parameters for
    /// GET or the form parameters for POST, both of which are covered by the signature.
    pub fn authorization(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> TwitterResult<String> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| TwitterError::OAuth(format!("failed to get timestamp: {e}")))?
            .as_secs()
            .to_string();

        self.authorization_with(method, url, params, &generate_nonce(), &timestamp)
    }

    pub(crate) fn authorization_with(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> TwitterResult<String> {
        let mut oauth_params = vec![
            (
                "oauth_consumer_key".to_owned(),
                self.credentials.consumer_key.clone(),
            ),
            ("oauth_nonce".to_owned(), nonce.to_owned()),
            ("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned()),
            ("oauth_timestamp".to_owned(), timestamp.to_owned()),
            (
                "oauth_token".to_owned(),
                self.credentials.access_token_key.clone(),
            ),
            ("oauth_version".to_owned(), "1.0".to_owned()),
        ];

        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature".to_owned(), signature));

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }

    fn signature(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
        oauth_params: &[(String, String)],
    ) -> TwitterResult<String> {
        // parameters are sorted by their encoded key, then encoded value
        let mut encoded: Vec<(String, String)> = oauth_params
            .iter()
            .chain(params.iter())
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.as_str(),
            percent_encode(url),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.access_token_secret)
        );

        hmac_sha1(&signing_key, &base_string)
    }
}

/// Percent-encodes a string as RFC 3986 (and OAuth) require.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

fn hmac_sha1(key: &str, data: &str) -> TwitterResult<String> {
    type HmacSha1 = Hmac<Sha1>;

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| TwitterError::OAuth(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
