use serde::{Deserialize, Serialize};

use super::{created_at_in_seconds, Entity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_screen_name: Option<String>,
}

impl DirectMessage {
    pub fn created_at_in_seconds(&self) -> Option<i64> {
        created_at_in_seconds(self.created_at.as_deref())
    }
}

impl Entity for DirectMessage {}
