use tracing::info;

use crate::api::ApiClient;
use crate::error::{TwitterError, TwitterResult};
use crate::models::{from_json_array, Entity, Status};
use crate::params::{Numeric, Params};
use crate::text::{calculate_status_length, split_status, CHARACTER_LIMIT};

const MAX_RETWEETS_COUNT: i64 = 100;

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub trim_user: Option<bool>,
    pub include_my_retweet: Option<bool>,
    pub include_entities: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub in_reply_to_status_id: Option<Numeric>,
    /// Sent only together with `longitude`.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_id: Option<String>,
    pub display_coordinates: Option<bool>,
    pub trim_user: Option<bool>,
}

impl ApiClient {
    pub async fn status(&self, id: impl Into<Numeric>, opts: &ShowOptions) -> TwitterResult<Status> {
        self.require_auth()?;
        let mut params = Params::new();
        params.integer("id", Some(&id.into()))?;
        params
            .opt_boolean("trim_user", opts.trim_user)
            .opt_boolean("include_my_retweet", opts.include_my_retweet)
            .opt_boolean("include_entities", opts.include_entities);

        let data = self.get("statuses/show", &params).await?;
        Status::from_json(&data)
    }

    pub async fn destroy_status(
        &self,
        id: impl Into<Numeric>,
        trim_user: Option<bool>,
    ) -> TwitterResult<Status> {
        self.require_auth()?;
        let id = id.into().integer("id")?;
        let mut params = Params::new();
        params.opt_boolean("trim_user", trim_user);

        let data = self.post(&format!("statuses/destroy/{id}"), &params).await?;
        Status::from_json(&data)
    }

    /// Posts a status. Links count as shortlinks towards the character limit.
    pub async fn post_update(&self, text: &str, opts: &UpdateOptions) -> TwitterResult<Status> {
        self.require_auth()?;
        self.check_length(text)?;

        let mut params = Params::new();
        params.set("status", text);
        params.integer("in_reply_to_status_id", opts.in_reply_to_status_id.as_ref())?;
        if let (Some(lat), Some(long)) = (opts.latitude, opts.longitude) {
            params.set("lat", lat.to_string()).set("long", long.to_string());
        }
        params
            .set_opt("place_id", opts.place_id.clone())
            .opt_boolean("display_coordinates", opts.display_coordinates)
            .opt_boolean("trim_user", opts.trim_user);

        let data = self.post("statuses/update", &params).await?;
        Status::from_json(&data)
    }

    /// Posts `text` as a series of statuses, appending `continuation` (e.g. `"..."`)
    /// to every one but the last. Statuses are returned in posting order.
    pub async fn post_updates(
        &self,
        text: &str,
        continuation: Option<&str>,
        opts: &UpdateOptions,
    ) -> TwitterResult<Vec<Status>> {
        self.require_auth()?;
        let continuation = continuation.unwrap_or("");
        let width = CHARACTER_LIMIT.saturating_sub(continuation.chars().count());

        let mut segments = split_status(text, width)?;
        let last = segments.len().saturating_sub(1);
        for segment in segments.iter_mut().take(last) {
            segment.push_str(continuation);
        }
        // nothing is posted unless every segment fits
        for segment in &segments {
            self.check_length(segment)?;
        }

        let mut results = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            results.push(self.post_update(segment, opts).await?);
            info!(part = i + 1, of = segments.len(), "posted status segment");
        }
        Ok(results)
    }

    pub async fn post_retweet(
        &self,
        original_id: impl Into<Numeric>,
        trim_user: Option<bool>,
    ) -> TwitterResult<Status> {
        self.require_auth()?;
        let id = original_id.into().integer("original_id")?;
        if id <= 0 {
            return Err(TwitterError::invalid("'original_id' must be a positive number"));
        }
        let mut params = Params::new();
        params.opt_boolean("trim_user", trim_user);

        let data = self.post(&format!("statuses/retweet/{id}"), &params).await?;
        Status::from_json(&data)
    }

    /// Up to 100 of the most recent retweets of a status.
    pub async fn retweets(
        &self,
        status_id: impl Into<Numeric>,
        count: Option<Numeric>,
        trim_user: Option<bool>,
    ) -> TwitterResult<Vec<Status>> {
        self.require_auth()?;
        let id = status_id.into().integer("id")?;
        let mut params = Params::new();
        params.count("count", count.as_ref(), MAX_RETWEETS_COUNT)?;
        params.opt_boolean("trim_user", trim_user);

        let data = self.get(&format!("statuses/retweets/{id}"), &params).await?;
        from_json_array(&data)
    }

    fn check_length(&self, text: &str) -> TwitterResult<()> {
        if calculate_status_length(text, self.config().shortlink_size) > CHARACTER_LIMIT {
            return Err(TwitterError::invalid(format!(
                "Text must be less than or equal to {CHARACTER_LIMIT} characters."
            )));
        }
        Ok(())
    }
}
