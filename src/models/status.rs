use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{created_at_in_seconds, Entity, HashTag, Url, User};

const FUDGE: f64 = 1.25;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Status {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweeted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweeted_status: Option<Box<Status>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_retweet: Option<CurrentUserRetweet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withheld_copyright: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withheld_in_countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withheld_scope: Option<String>,
}

/// Links, mentions, hashtags and media extracted from a status' text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<Url>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_mentions: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<HashTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Value>>,
}

/// The authenticating user's retweet of a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentUserRetweet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
}

impl Status {
    pub fn created_at_in_seconds(&self) -> Option<i64> {
        created_at_in_seconds(self.created_at.as_deref())
    }

    /// A human readable age such as "about 3 hours ago", relative to `now` (epoch seconds).
    pub fn relative_created_at(&self, now: i64) -> Option<String> {
        let delta = (now - self.created_at_in_seconds()?) as f64;
        let (minute, hour, day) = (60.0, 3600.0, 86400.0);

        let text = if delta < FUDGE {
            "about a second ago".to_owned()
        } else if delta < minute / FUDGE {
            format!("about {} seconds ago", delta as i64)
        } else if delta < minute * FUDGE {
            "about a minute ago".to_owned()
        } else if delta < hour / FUDGE {
            format!("about {} minutes ago", (delta / minute) as i64)
        } else if delta < hour * FUDGE || delta / hour == 1.0 {
            "about an hour ago".to_owned()
        } else if delta < day / FUDGE {
            format!("about {} hours ago", (delta / hour) as i64)
        } else if delta < day * FUDGE || delta / day == 1.0 {
            "about a day ago".to_owned()
        } else {
            format!("about {} days ago", (delta / day) as i64)
        };
        Some(text)
    }

    pub fn urls(&self) -> &[Url] {
        self.entities
            .as_ref()
            .and_then(|e| e.urls.as_deref())
            .unwrap_or_default()
    }

    pub fn user_mentions(&self) -> &[User] {
        self.entities
            .as_ref()
            .and_then(|e| e.user_mentions.as_deref())
            .unwrap_or_default()
    }

    pub fn hashtags(&self) -> &[HashTag] {
        self.entities
            .as_ref()
            .and_then(|e| e.hashtags.as_deref())
            .unwrap_or_default()
    }
}

impl Entity for Status {}
impl Entity for Entities {}
impl Entity for CurrentUserRetweet {}
