//! Client for the Twitter REST API v1.1.
//!
//! Requests are signed with OAuth 1.0a when credentials are configured, GET
//! responses are cached for a configurable TTL, and responses are decoded into
//! the value types in [`models`].

pub mod api;
pub mod cache;
pub mod config;
pub mod cursor;
pub mod endpoints;
pub mod error;
pub mod methods;
pub mod models;
pub mod oauth;
pub mod params;
mod request;
pub mod text;

pub use api::{parse_and_check, ApiClient};
pub use cache::{FileCache, MemoryCache, ResponseCache};
pub use config::{ClientConfig, Credentials, Settings};
pub use cursor::Cursor;
pub use endpoints::{
    direct_messages::DirectMessageOptions,
    lists::ListMode,
    search::{Geocode, ResultType, SearchOptions},
    statuses::{ShowOptions, UpdateOptions},
    users::LookupOptions,
    PageOptions, TimelineOptions,
};
pub use error::{TwitterError, TwitterResult};
pub use methods::HttpMethod;
pub use models::{DirectMessage, Entity, HashTag, List, Status, Trend, Url, User};
pub use params::{ListRef, Numeric, Params, UserRef};
pub use text::calculate_status_length;
