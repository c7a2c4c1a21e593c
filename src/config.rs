use std::{collections::BTreeMap, fmt, path::PathBuf, sync::Arc, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    cache::{FileCache, MemoryCache, ResponseCache},
    error::{TwitterError, TwitterResult},
};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
/// Length Twitter counted for a shortened link when the client was written.
pub const DEFAULT_SHORTLINK_SIZE: usize = 19;

const UTF8_LABELS: [&str; 2] = ["utf-8", "utf8"];

/// The four OAuth 1.0a secrets of an application acting on behalf of a user.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token_key: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token_key: access_token_key.into(),
            access_token_secret: access_token_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token_key", &self.access_token_key)
            .finish_non_exhaustive()
    }
}

/// Immutable configuration handed to [`crate::ApiClient::new`].
#[derive(Clone)]
pub struct ClientConfig {
    pub credentials: Option<Credentials>,
    pub base_url: String,
    /// Encoding of the text handed to the client. Rust strings are UTF-8, so only
    /// UTF-8 labels are accepted.
    pub input_encoding: Option<String>,
    pub request_headers: BTreeMap<String, String>,
    pub user_agent: String,
    /// Sent as the `source` parameter of every request when set.
    pub source: Option<String>,
    /// `None` disables caching.
    pub cache: Option<Arc<dyn ResponseCache>>,
    /// A zero TTL disables caching.
    pub cache_ttl: Duration,
    pub use_gzip: bool,
    pub debug_http: bool,
    pub shortlink_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            input_encoding: None,
            request_headers: BTreeMap::new(),
            user_agent: format!("twitter-rest/{}", env!("CARGO_PKG_VERSION")),
            source: None,
            cache: Some(Arc::new(MemoryCache::default())),
            cache_ttl: DEFAULT_CACHE_TTL,
            use_gzip: false,
            debug_http: false,
            shortlink_size: DEFAULT_SHORTLINK_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the `X-Twitter-Client`, `X-Twitter-Client-URL` and `X-Twitter-Client-Version` headers.
    pub fn with_x_twitter_headers(
        self,
        client: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.with_header("X-Twitter-Client", client)
            .with_header("X-Twitter-Client-URL", url)
            .with_header("X-Twitter-Client-Version", version)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_gzip(mut self, use_gzip: bool) -> Self {
        self.use_gzip = use_gzip;
        self
    }

    pub fn with_debug_http(mut self, debug_http: bool) -> Self {
        self.debug_http = debug_http;
        self
    }

    pub fn with_input_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.input_encoding = Some(encoding.into());
        self
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache.is_some() && !self.cache_ttl.is_zero()
    }

    pub(crate) fn validate(&self) -> TwitterResult<()> {
        Url::parse(&self.base_url)?;
        if let Some(encoding) = &self.input_encoding {
            if !UTF8_LABELS.contains(&encoding.to_ascii_lowercase().as_str()) {
                return Err(TwitterError::Config(format!(
                    "unsupported input encoding {encoding}; text is always UTF-8"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("input_encoding", &self.input_encoding)
            .field("request_headers", &self.request_headers)
            .field("user_agent", &self.user_agent)
            .field("source", &self.source)
            .field("cache", &self.cache.is_some())
            .field("cache_ttl", &self.cache_ttl)
            .field("use_gzip", &self.use_gzip)
            .field("debug_http", &self.debug_http)
            .field("shortlink_size", &self.shortlink_size)
            .finish()
    }
}

/// Settings read from `twitter-rest.toml` and `TWITTER_*` environment variables.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token_key: Option<String>,
    pub access_token_secret: Option<String>,
    pub base_url: Option<String>,
    pub input_encoding: Option<String>,
    pub user_agent: Option<String>,
    pub source: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    /// Responses are cached on disk here instead of in memory when set.
    pub cache_dir: Option<PathBuf>,
    pub use_gzip: Option<bool>,
    pub debug_http: Option<bool>,
}

impl Settings {
    pub fn load() -> TwitterResult<Self> {
        Self::build(config::File::with_name("twitter-rest").required(false))
    }

    pub fn from_file(path: impl Into<PathBuf>) -> TwitterResult<Self> {
        Self::build(config::File::from(path.into()))
    }

    fn build<S>(file: S) -> TwitterResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("TWITTER").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| TwitterError::Config(e.to_string()))
    }

    pub fn into_client_config(self) -> TwitterResult<ClientConfig> {
        let credentials = match (
            self.consumer_key,
            self.consumer_secret,
            self.access_token_key,
            self.access_token_secret,
        ) {
            (None, None, None, None) => None,
            (Some(ck), Some(cs), Some(tk), Some(ts)) => Some(Credentials::new(ck, cs, tk, ts)),
            (Some(_), _, None, _) | (Some(_), _, _, None) => {
                return Err(TwitterError::Config(
                    "Twitter requires OAuth Access Token for all API access".to_owned(),
                ))
            }
            _ => {
                return Err(TwitterError::Config(
                    "consumer_key, consumer_secret, access_token_key and access_token_secret must be set together"
                        .to_owned(),
                ))
            }
        };

        let mut config = ClientConfig {
            credentials,
            input_encoding: self.input_encoding,
            source: self.source,
            use_gzip: self.use_gzip.unwrap_or(false),
            debug_http: self.debug_http.unwrap_or(false),
            ..ClientConfig::default()
        };
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(secs) = self.cache_ttl_secs {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(dir) = self.cache_dir {
            config.cache = Some(Arc::new(FileCache::with_dir(dir)));
        }
        config.validate()?;

        Ok(config)
    }
}
