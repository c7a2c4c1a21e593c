use serde::{Deserialize, Serialize};

use super::{Entity, Status};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url_https: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_background_tile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_background_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_sidebar_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourites_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// The user's most recent status, when Twitter embeds it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Box<Status>>,
}

impl User {
    /// The avatar URL, preferring the https variant.
    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url_https
            .as_deref()
            .or(self.profile_image_url.as_deref())
    }
}

impl Entity for User {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_are_none_and_not_serialized() {
        let data = json!({"id": 12, "screen_name": "jack", "verified": true});
        let user = User::from_json(&data).unwrap();
        assert_eq!(user.id, Some(12));
        assert_eq!(user.name, None);
        assert_eq!(serde_json::Value::Object(user.to_map()), data);
    }

    #[test]
    fn https_profile_image_is_preferred() {
        let user = User::from_json(&json!({
            "profile_image_url": "http://a0.twimg.com/a.png",
            "profile_image_url_https": "https://si0.twimg.com/a.png"
        }))
        .unwrap();
        assert_eq!(user.profile_image_url(), Some("https://si0.twimg.com/a.png"));

        let user = User::from_json(&json!({"profile_image_url": "http://a0.twimg.com/a.png"})).unwrap();
        assert_eq!(user.profile_image_url(), Some("http://a0.twimg.com/a.png"));
    }

    #[test]
    fn embedded_status_is_decoded() {
        let user = User::from_json(&json!({
            "id": 1,
            "status": {"id": 99, "text": "hello", "in_reply_to_status_id": null}
        }))
        .unwrap();
        let status = user.status.unwrap();
        assert_eq!(status.id, Some(99));
        assert_eq!(status.in_reply_to_status_id, None);
    }
}
