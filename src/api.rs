use std::sync::Arc;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{cache_key, is_fresh};
use crate::config::{ClientConfig, Credentials};
use crate::error::{TwitterError, TwitterResult};
use crate::methods::HttpMethod;
use crate::oauth::OAuthSigner;
use crate::params::Params;
use crate::request::{build_http_client, PreparedRequest};

const OVER_CAPACITY_TITLE: &str = "<title>Twitter / Over capacity</title>";
const ERROR_TITLE: &str = "<title>Twitter / Error</title>";

/// Client for the Twitter REST API v1.1.
///
/// Endpoint methods are added by the modules under [`crate::endpoints`], one
/// `impl ApiClient` block per endpoint family. Clones share the HTTP pool and the cache.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Arc<ClientConfig>,
    signer: Option<OAuthSigner>,
    default_params: Params,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> TwitterResult<Self> {
        config.validate()?;
        let client = build_http_client(&config)?;
        Ok(Self::from_parts(client, config))
    }

    fn from_parts(client: Client, config: ClientConfig) -> Self {
        let signer = config.credentials.clone().map(OAuthSigner::new);
        let mut default_params = Params::new();
        default_params.set_opt("source", config.source.clone());

        Self {
            client,
            config: Arc::new(config),
            signer,
            default_params,
        }
    }

    /// A client acting with other credentials; the cache is shared.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        let config = ClientConfig {
            credentials: Some(credentials),
            ..(*self.config).clone()
        };
        Self::from_parts(self.client.clone(), config)
    }

    pub fn without_credentials(&self) -> Self {
        let config = ClientConfig {
            credentials: None,
            ..(*self.config).clone()
        };
        Self::from_parts(self.client.clone(), config)
    }

    pub fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn require_auth(&self) -> TwitterResult<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(TwitterError::AuthenticationRequired)
        }
    }

    /// `<base_url>/<resource>.json`
    pub fn url(&self, resource: &str) -> String {
        format!(
            "{}/{}.json",
            self.config.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    /// Fetches `url` and returns the body of a successful response.
    ///
    /// GET responses are served from the cache while fresh unless `no_cache` is set.
    /// Non-2xx responses fail with the API error they carry, or with
    /// [`TwitterError::HttpStatus`] when there is none.
    pub async fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        params: &Params,
        no_cache: bool,
    ) -> TwitterResult<String> {
        let params = params.with_defaults(&self.default_params);
        let req = PreparedRequest::new(method, url, &params, self.signer.as_ref())?;

        let cache = match &self.config.cache {
            Some(cache)
                if method == HttpMethod::Get && !no_cache && self.config.caching_enabled() =>
            {
                cache
            }
            _ => {
                debug!(%method, url = %req.url, "fetching without cache");
                let (status, body) = self.execute(req).await?;
                return check_status(status, body);
            }
        };

        let key = cache_key(self.signer.as_ref().map(|s| s.consumer_key()), &req.url);
        if let Some(cached_at) = cache.cached_time(&key).await? {
            if is_fresh(cached_at, self.config.cache_ttl, Utc::now()) {
                if let Some(body) = cache.get(&key).await? {
                    debug!(url = %req.url, %cached_at, "cache hit");
                    return Ok(body);
                }
            }
        }

        debug!(url = %req.url, "cache miss");
        let (status, body) = self.execute(req).await?;
        let body = check_status(status, body)?;
        cache.set(&key, &body).await?;
        info!(key = %key, "refreshed cache entry");
        Ok(body)
    }

    /// Sends a request bypassing the cache and returns the status with the raw body.
    pub(crate) async fn fetch_raw(
        &self,
        method: HttpMethod,
        url: &str,
        params: &Params,
    ) -> TwitterResult<(StatusCode, String)> {
        let params = params.with_defaults(&self.default_params);
        let req = PreparedRequest::new(method, url, &params, self.signer.as_ref())?;
        self.execute(req).await
    }

    /// Fetches `<base_url>/<resource>.json` and checks the body for API errors.
    pub(crate) async fn call(
        &self,
        method: HttpMethod,
        resource: &str,
        params: &Params,
        no_cache: bool,
    ) -> TwitterResult<Value> {
        let body = self
            .fetch(method, &self.url(resource), params, no_cache)
            .await?;
        parse_and_check(&body)
    }

    pub(crate) async fn get(&self, resource: &str, params: &Params) -> TwitterResult<Value> {
        self.call(HttpMethod::Get, resource, params, false).await
    }

    /// Every write needs a signed-in user.
    pub(crate) async fn post(&self, resource: &str, params: &Params) -> TwitterResult<Value> {
        self.require_auth()?;
        self.call(HttpMethod::Post, resource, params, true).await
    }

    async fn execute(&self, req: PreparedRequest) -> TwitterResult<(StatusCode, String)> {
        if self.config.debug_http {
            debug!(method = %req.method, url = %req.url, body = ?req.body, "sending request");
        }

        let resp = req
            .into_builder(&self.client, self.config.use_gzip)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if self.config.debug_http {
            debug!(status = status.as_u16(), body = %body, "received response");
        } else {
            debug!(status = status.as_u16(), len = body.len(), "received response");
        }
        Ok((status, body))
    }
}

pub(crate) fn check_status(status: StatusCode, body: String) -> TwitterResult<String> {
    if status.is_success() {
        return Ok(body);
    }
    match parse_and_check(&body) {
        Err(
            e @ (TwitterError::Api { .. }
            | TwitterError::RemoteCapacity
            | TwitterError::RemoteTechnical),
        ) => Err(e),
        _ => Err(TwitterError::HttpStatus(status.as_u16(), body)),
    }
}

/// Decodes a response body, turning Twitter's error pages and error objects into errors.
pub fn parse_and_check(body: &str) -> TwitterResult<Value> {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(_) if body.contains(OVER_CAPACITY_TITLE) => return Err(TwitterError::RemoteCapacity),
        Err(_) if body.contains(ERROR_TITLE) => return Err(TwitterError::RemoteTechnical),
        Err(e) => return Err(TwitterError::Decode(e)),
    };

    if let Some(obj) = data.as_object() {
        if let Some(error) = obj.get("error") {
            return Err(TwitterError::Api {
                code: None,
                message: message_of(error),
            });
        }
        if let Some(errors) = obj.get("errors") {
            let first = errors.as_array().and_then(|list| list.first());
            return Err(match first {
                Some(first) => TwitterError::Api {
                    code: first.get("code").and_then(Value::as_i64),
                    message: first
                        .get("message")
                        .map(message_of)
                        .unwrap_or_else(|| first.to_string()),
                },
                None => TwitterError::Api {
                    code: None,
                    message: message_of(errors),
                },
            });
        }
    }

    Ok(data)
}

fn message_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
