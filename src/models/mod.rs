//! Value types for the objects Twitter returns.
//!
//! Every field is optional: a key missing from the response is `None`, and
//! `None` fields are left out again when serializing.

use chrono::DateTime;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::{TwitterError, TwitterResult};

mod direct_message;
mod entities;
mod list;
mod status;
mod trend;
mod user;

pub use direct_message::DirectMessage;
pub use entities::{HashTag, Url};
pub use list::List;
pub use status::{CurrentUserRetweet, Entities, Status};
pub use trend::Trend;
pub use user::User;

const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

pub trait Entity: Serialize + DeserializeOwned {
    fn from_json(data: &Value) -> TwitterResult<Self> {
        serde::Deserialize::deserialize(data).map_err(TwitterError::Decode)
    }

    /// The sparse map representation; `None` fields are omitted.
    fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    fn to_json(&self) -> String {
        Value::Object(self.to_map()).to_string()
    }
}

/// Decodes every element of a JSON array.
pub(crate) fn from_json_array<T: Entity>(data: &Value) -> TwitterResult<Vec<T>> {
    match data {
        Value::Array(items) => items.iter().map(T::from_json).collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(TwitterError::Decode(serde::de::Error::custom(
            "expected a JSON array",
        ))),
    }
}

/// Parses Twitter's `Wed Aug 27 13:08:45 +0000 2008` timestamps into epoch seconds.
pub(crate) fn created_at_in_seconds(created_at: Option<&str>) -> Option<i64> {
    let created_at = created_at?;
    DateTime::parse_from_str(created_at, CREATED_AT_FORMAT)
        .ok()
        .map(|t| t.timestamp())
}
