use super::TimelineOptions;
use crate::api::ApiClient;
use crate::error::TwitterResult;
use crate::models::{from_json_array, Entity, Status};
use crate::params::{Numeric, Params, UserRef};

const MAX_FAVORITES_COUNT: i64 = 200;

impl ApiClient {
    pub async fn create_favorite(
        &self,
        id: impl Into<Numeric>,
        include_entities: Option<bool>,
    ) -> TwitterResult<Status> {
        self.favorite("favorites/create", id.into(), include_entities)
            .await
    }

    pub async fn destroy_favorite(
        &self,
        id: impl Into<Numeric>,
        include_entities: Option<bool>,
    ) -> TwitterResult<Status> {
        self.favorite("favorites/destroy", id.into(), include_entities)
            .await
    }

    async fn favorite(
        &self,
        resource: &str,
        id: Numeric,
        include_entities: Option<bool>,
    ) -> TwitterResult<Status> {
        let mut params = Params::new();
        params.integer("id", Some(&id))?;
        params.opt_boolean("include_entities", include_entities);

        let data = self.post(resource, &params).await?;
        Status::from_json(&data)
    }

    /// Statuses liked by `user`, or by the authenticating user when `None`.
    pub async fn favorites(
        &self,
        user: Option<&UserRef>,
        opts: &TimelineOptions,
    ) -> TwitterResult<Vec<Status>> {
        let mut params = Params::new();
        if let Some(user) = user {
            user.apply(&mut params, "")?;
        }
        opts.apply(&mut params, MAX_FAVORITES_COUNT)?;

        let data = self.get("favorites/list", &params).await?;
        from_json_array(&data)
    }
}
