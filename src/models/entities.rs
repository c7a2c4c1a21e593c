use serde::{Deserialize, Serialize};

use super::Entity;

/// A t.co link and the URL it expands to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Url {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
}

impl Entity for Url {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HashTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Entity for HashTag {}
