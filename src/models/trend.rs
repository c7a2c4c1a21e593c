use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Entity;
use crate::error::TwitterResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Trend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When Twitter computed the trend, taken from the response's `as_of`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Trend {
    /// Decodes a trend, stamping it with the `as_of` of the enclosing response.
    pub fn from_json_at(data: &Value, as_of: Option<&str>) -> TwitterResult<Self> {
        let mut trend = Self::from_json(data)?;
        if let Some(as_of) = as_of {
            trend.timestamp = Some(as_of.to_owned());
        }
        Ok(trend)
    }
}

impl Entity for Trend {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn as_of_becomes_timestamp() {
        let data = json!({
            "name": "#rustlang",
            "query": "%23rustlang",
            "url": "http://twitter.com/search/?q=%23rustlang",
            "promoted_content": null
        });
        let trend = Trend::from_json_at(&data, Some("2012-08-24T23:25:43Z")).unwrap();
        assert_eq!(trend.timestamp.as_deref(), Some("2012-08-24T23:25:43Z"));
        assert_eq!(trend.name.as_deref(), Some("#rustlang"));

        let trend = Trend::from_json_at(&data, None).unwrap();
        assert_eq!(trend.timestamp, None);
    }
}
