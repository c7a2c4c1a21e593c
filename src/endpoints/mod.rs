//! One module per family of REST endpoints, each adding methods to [`ApiClient`].
//!
//! [`ApiClient`]: crate::ApiClient

use crate::error::TwitterResult;
use crate::params::{Numeric, Params};

pub mod account;
pub mod direct_messages;
pub mod favorites;
pub mod friendships;
pub mod lists;
pub mod search;
pub mod statuses;
pub mod timelines;
pub mod users;

/// Options shared by the timeline-shaped endpoints. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct TimelineOptions {
    pub count: Option<Numeric>,
    pub since_id: Option<Numeric>,
    pub max_id: Option<Numeric>,
    pub trim_user: Option<bool>,
    pub exclude_replies: Option<bool>,
    pub include_rts: Option<bool>,
    pub contributor_details: Option<bool>,
    pub include_entities: Option<bool>,
    pub include_user_entities: Option<bool>,
}

impl TimelineOptions {
    pub(crate) fn apply(&self, params: &mut Params, max_count: i64) -> TwitterResult<()> {
        params.count("count", self.count.as_ref(), max_count)?;
        params.integer("since_id", self.since_id.as_ref())?;
        params.integer("max_id", self.max_id.as_ref())?;
        params
            .opt_boolean("trim_user", self.trim_user)
            .opt_boolean("exclude_replies", self.exclude_replies)
            .opt_boolean("include_rts", self.include_rts)
            .opt_boolean("contributor_details", self.contributor_details)
            .opt_boolean("include_entities", self.include_entities)
            .opt_boolean("include_user_entities", self.include_user_entities);
        Ok(())
    }
}

/// Options for the cursor-paginated endpoints.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// First cursor to request; `-1` (the first page) when unset.
    pub cursor: Option<Numeric>,
    pub count: Option<Numeric>,
    pub skip_status: Option<bool>,
    pub include_user_entities: Option<bool>,
    pub stringify_ids: Option<bool>,
}

impl PageOptions {
    /// Writes the options and returns the starting cursor.
    pub(crate) fn apply(&self, params: &mut Params) -> TwitterResult<i64> {
        params.integer("count", self.count.as_ref())?;
        params
            .opt_boolean("skip_status", self.skip_status)
            .opt_boolean("include_user_entities", self.include_user_entities)
            .opt_boolean("stringify_ids", self.stringify_ids);
        match &self.cursor {
            Some(cursor) => cursor.integer("cursor"),
            None => Ok(crate::cursor::FIRST_PAGE),
        }
    }
}
