use super::TimelineOptions;
use crate::api::ApiClient;
use crate::error::TwitterResult;
use crate::models::{from_json_array, Status};
use crate::params::{Params, UserRef};

const MAX_TIMELINE_COUNT: i64 = 200;
const MAX_RETWEETS_COUNT: i64 = 100;

impl ApiClient {
    /// Tweets and retweets by the authenticating user and the users they follow.
    pub async fn home_timeline(&self, opts: &TimelineOptions) -> TwitterResult<Vec<Status>> {
        self.require_auth()?;
        let mut params = Params::new();
        opts.apply(&mut params, MAX_TIMELINE_COUNT)?;

        let data = self.get("statuses/home_timeline", &params).await?;
        from_json_array(&data)
    }

    /// Tweets posted by `user`, or by the authenticating user when `None`.
    pub async fn user_timeline(
        &self,
        user: Option<&UserRef>,
        opts: &TimelineOptions,
    ) -> TwitterResult<Vec<Status>> {
        let mut params = Params::new();
        if let Some(user) = user {
            user.apply(&mut params, "")?;
        }
        opts.apply(&mut params, MAX_TIMELINE_COUNT)?;

        let data = self.get("statuses/user_timeline", &params).await?;
        from_json_array(&data)
    }

    /// The authenticating user's own retweets.
    pub async fn user_retweets(&self, opts: &TimelineOptions) -> TwitterResult<Vec<Status>> {
        let opts = TimelineOptions {
            include_rts: Some(true),
            exclude_replies: Some(true),
            ..opts.clone()
        };
        self.user_timeline(None, &opts).await
    }

    /// The authenticating user's timeline including replies but not retweets.
    pub async fn replies(&self, opts: &TimelineOptions) -> TwitterResult<Vec<Status>> {
        let opts = TimelineOptions {
            include_rts: Some(false),
            exclude_replies: Some(false),
            ..opts.clone()
        };
        self.user_timeline(None, &opts).await
    }

    pub async fn mentions(&self, opts: &TimelineOptions) -> TwitterResult<Vec<Status>> {
        self.require_auth()?;
        let mut params = Params::new();
        opts.apply(&mut params, MAX_TIMELINE_COUNT)?;

        let data = self.get("statuses/mentions_timeline", &params).await?;
        from_json_array(&data)
    }

    /// The authenticating user's tweets that others retweeted.
    pub async fn retweets_of_me(&self, opts: &TimelineOptions) -> TwitterResult<Vec<Status>> {
        self.require_auth()?;
        let mut params = Params::new();
        opts.apply(&mut params, MAX_RETWEETS_COUNT)?;

        let data = self.get("statuses/retweets_of_me", &params).await?;
        from_json_array(&data)
    }
}
