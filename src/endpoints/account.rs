use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;

use crate::api::{check_status, parse_and_check, ApiClient};
use crate::error::TwitterResult;
use crate::methods::HttpMethod;
use crate::models::{Entity, User};
use crate::params::Params;

/// Interval suggested when the rate limit of a resource is unknown.
pub const DEFAULT_HIT_FREQUENCY: u64 = 60;

impl ApiClient {
    /// The authenticating user, or `None` when Twitter rejects the credentials.
    pub async fn verify_credentials(&self) -> TwitterResult<Option<User>> {
        self.require_auth()?;
        let url = self.url("account/verify_credentials");
        let (status, body) = self
            .fetch_raw(HttpMethod::Get, &url, &Params::new())
            .await?;
        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let body = check_status(status, body)?;
        User::from_json(&parse_and_check(&body)?).map(Some)
    }

    /// The raw rate limit status, optionally narrowed to comma separated resource
    /// families such as `"statuses,friends"`. Never cached.
    pub async fn rate_limit_status(&self, resources: Option<&str>) -> TwitterResult<Value> {
        let mut params = Params::new();
        params.set_opt("resources", resources);
        self.call(HttpMethod::Get, "application/rate_limit_status", &params, true)
            .await
    }

    /// Seconds to wait between calls to `resource` (e.g. `"/statuses/home_timeline"`)
    /// so that its remaining calls last until the window resets.
    pub async fn maximum_hit_frequency(&self, resource: &str) -> TwitterResult<u64> {
        let family = resource
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        let status = self.rate_limit_status(Some(family)).await?;
        Ok(hit_frequency(&status, resource, Utc::now().timestamp()))
    }
}

/// Derives the interval from a rate limit status taken at `now` (epoch seconds).
pub fn hit_frequency(status: &Value, resource: &str, now: i64) -> u64 {
    let limit = status
        .get("resources")
        .and_then(Value::as_object)
        .and_then(|families| families.values().find_map(|family| family.get(resource)));
    let Some(limit) = limit else {
        return DEFAULT_HIT_FREQUENCY;
    };

    let reset = limit.get("reset").and_then(Value::as_i64);
    let remaining = limit.get("remaining").and_then(Value::as_u64);
    match (reset, remaining) {
        (Some(reset), Some(0)) => reset.saturating_sub(now).max(0) as u64,
        (Some(reset), Some(remaining)) => reset.saturating_sub(now).max(0) as u64 / remaining + 1,
        _ => DEFAULT_HIT_FREQUENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(remaining: u64, reset: i64) -> Value {
        json!({
            "rate_limit_context": {"access_token": "786491-24zE39NUezJ8UTmOGOtLhgyLgCkPyY4dAcx6NA6sDKw"},
            "resources": {
                "statuses": {
                    "/statuses/home_timeline": {"limit": 15, "remaining": remaining, "reset": reset}
                }
            }
        })
    }

    #[test]
    fn spreads_remaining_calls_over_window() {
        assert_eq!(hit_frequency(&status(15, 1_000 + 900), "/statuses/home_timeline", 1_000), 61);
        assert_eq!(hit_frequency(&status(0, 1_000 + 300), "/statuses/home_timeline", 1_000), 300);
    }

    #[test]
    fn unknown_resource_or_past_reset() {
        assert_eq!(hit_frequency(&status(5, 0), "/friends/ids", 1_000), 60);
        assert_eq!(hit_frequency(&json!({}), "/statuses/home_timeline", 1_000), 60);
        assert_eq!(hit_frequency(&status(5, 500), "/statuses/home_timeline", 1_000), 1);
    }
}
