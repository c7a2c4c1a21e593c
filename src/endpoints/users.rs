use tracing::warn;

use super::PageOptions;
use crate::api::ApiClient;
use crate::cursor::{decode_id, Cursor};
use crate::error::{TwitterError, TwitterResult};
use crate::models::{from_json_array, Entity, User};
use crate::params::{Numeric, Params, UserRef};

/// Users to fetch with [`ApiClient::users_lookup`]; at least one field must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    pub user_ids: Vec<Numeric>,
    pub screen_names: Vec<String>,
    /// Looked up by their ids.
    pub users: Vec<User>,
    pub include_entities: Option<bool>,
}

impl ApiClient {
    /// Users the given user (or the authenticating user) follows.
    pub fn friends(
        &self,
        user: Option<&UserRef>,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, User>> {
        self.user_pager("friends/list", "users", user, opts, User::from_json)
    }

    pub fn followers(
        &self,
        user: Option<&UserRef>,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, User>> {
        self.user_pager("followers/list", "users", user, opts, User::from_json)
    }

    pub fn friend_ids(
        &self,
        user: Option<&UserRef>,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, u64>> {
        self.user_pager("friends/ids", "ids", user, opts, decode_id)
    }

    pub fn follower_ids(
        &self,
        user: Option<&UserRef>,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, u64>> {
        self.user_pager("followers/ids", "ids", user, opts, decode_id)
    }

    fn user_pager<T>(
        &self,
        resource: &'static str,
        field: &'static str,
        user: Option<&UserRef>,
        opts: &PageOptions,
        decode: fn(&serde_json::Value) -> TwitterResult<T>,
    ) -> TwitterResult<Cursor<'_, T>> {
        self.require_auth()?;
        let mut params = Params::new();
        if let Some(user) = user {
            user.apply(&mut params, "")?;
        }
        let start = opts.apply(&mut params)?;
        Ok(Cursor::new(self, resource, field, params, start, decode))
    }

    /// Fetches up to 100 users at once. An unknown user yields an empty list.
    pub async fn users_lookup(&self, opts: &LookupOptions) -> TwitterResult<Vec<User>> {
        self.require_auth()?;
        if opts.user_ids.is_empty() && opts.screen_names.is_empty() && opts.users.is_empty() {
            return Err(TwitterError::invalid(
                "Specify at least one of user_id, screen_name, or users.",
            ));
        }

        let mut ids = opts
            .user_ids
            .iter()
            .map(|id| id.integer("user_id").map(|n| n.to_string()))
            .collect::<TwitterResult<Vec<_>>>()?;
        ids.extend(opts.users.iter().filter_map(|u| u.id).map(|id| id.to_string()));
        if ids.is_empty() && opts.screen_names.is_empty() {
            return Err(TwitterError::invalid("users without an id cannot be looked up"));
        }

        let mut params = Params::new();
        if !ids.is_empty() {
            params.set("user_id", ids.join(","));
        }
        if !opts.screen_names.is_empty() {
            params.set("screen_name", opts.screen_names.join(","));
        }
        params.opt_boolean("include_entities", opts.include_entities);

        match self.get("users/lookup", &params).await {
            Ok(data) => from_json_array(&data),
            Err(e) if e.is_not_found() => {
                warn!("users/lookup matched no users: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn user(&self, user: &UserRef, include_entities: Option<bool>) -> TwitterResult<User> {
        self.require_auth()?;
        let mut params = Params::new();
        user.apply(&mut params, "")?;
        params.opt_boolean("include_entities", include_entities);

        let data = self.get("users/show", &params).await?;
        User::from_json(&data)
    }
}
