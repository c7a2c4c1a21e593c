use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, NoProxy, Proxy, RequestBuilder};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{TwitterError, TwitterResult};
use crate::methods::HttpMethod;
use crate::oauth::{percent_encode, OAuthSigner};
use crate::params::Params;

/// A request ready to be sent. `url` never carries the OAuth signature, so it
/// doubles as the cache key for GET requests.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub authorization: Option<String>,
}

impl PreparedRequest {
    pub fn new(
        method: HttpMethod,
        url: &str,
        params: &Params,
        signer: Option<&OAuthSigner>,
    ) -> TwitterResult<Self> {
        let mut base = Url::parse(url)?;
        // query parameters belong to the signature, not to the signed url
        let mut pairs: Vec<(String, String)> = base.query_pairs().into_owned().collect();
        base.set_query(None);
        pairs.extend(params.pairs());

        let encoded = encode_pairs(&pairs);
        let authorization = signer
            .map(|signer| signer.authorization(method, base.as_str(), &pairs))
            .transpose()?;

        let (url, body) = match method {
            HttpMethod::Get if encoded.is_empty() => (base.to_string(), None),
            HttpMethod::Get => (format!("{base}?{encoded}"), None),
            HttpMethod::Post => (base.to_string(), Some(encoded)),
        };

        Ok(Self {
            method,
            url,
            body,
            authorization,
        })
    }

    pub fn into_builder(self, client: &Client, use_gzip: bool) -> RequestBuilder {
        let mut req = client.request(self.method.into(), &self.url);
        if let Some(authorization) = self.authorization {
            req = req.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = self.body {
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
            if use_gzip {
                req = req.header(ACCEPT_ENCODING, "identity");
            }
        }
        req
    }
}

/// Encodes pairs the same way they are encoded for the signature base string.
pub(crate) fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn build_http_client(config: &ClientConfig) -> TwitterResult<Client> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.request_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TwitterError::Config(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TwitterError::Config(format!("invalid value for header {name}: {e}")))?;
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .gzip(config.use_gzip)
        .connection_verbose(config.debug_http);

    builder = match (std::env::var("http_proxy"), std::env::var("https_proxy")) {
        (Ok(http), Ok(https)) => builder
            .proxy(Proxy::http(http)?.no_proxy(NoProxy::from_env()))
            .proxy(Proxy::https(https)?.no_proxy(NoProxy::from_env())),
        _ => builder.no_proxy(),
    };

    Ok(builder.build()?)
}
