use crate::api::ApiClient;
use crate::error::TwitterResult;
use crate::models::{from_json_array, DirectMessage, Entity};
use crate::params::{Numeric, Params, UserRef};

#[derive(Debug, Clone, Default)]
pub struct DirectMessageOptions {
    pub since_id: Option<Numeric>,
    pub max_id: Option<Numeric>,
    pub count: Option<Numeric>,
    /// Only honoured by the sent messages endpoint.
    pub page: Option<Numeric>,
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

impl DirectMessageOptions {
    fn params(&self) -> TwitterResult<Params> {
        let mut params = Params::new();
        params.integer("since_id", self.since_id.as_ref())?;
        params.integer("max_id", self.max_id.as_ref())?;
        params.integer("count", self.count.as_ref())?;
        params.integer("page", self.page.as_ref())?;
        params
            .opt_boolean("include_entities", self.include_entities)
            .opt_boolean("skip_status", self.skip_status);
        Ok(params)
    }
}

impl ApiClient {
    /// Messages received by the authenticating user.
    pub async fn direct_messages(
        &self,
        opts: &DirectMessageOptions,
    ) -> TwitterResult<Vec<DirectMessage>> {
        self.require_auth()?;
        let data = self.get("direct_messages", &opts.params()?).await?;
        from_json_array(&data)
    }

    pub async fn sent_direct_messages(
        &self,
        opts: &DirectMessageOptions,
    ) -> TwitterResult<Vec<DirectMessage>> {
        self.require_auth()?;
        let data = self.get("direct_messages/sent", &opts.params()?).await?;
        from_json_array(&data)
    }

    pub async fn post_direct_message(
        &self,
        text: &str,
        recipient: &UserRef,
    ) -> TwitterResult<DirectMessage> {
        let mut params = Params::new();
        recipient.apply(&mut params, "")?;
        params.set("text", text);

        let data = self.post("direct_messages/new", &params).await?;
        DirectMessage::from_json(&data)
    }

    pub async fn destroy_direct_message(
        &self,
        id: impl Into<Numeric>,
        include_entities: Option<bool>,
    ) -> TwitterResult<DirectMessage> {
        let mut params = Params::new();
        params.integer("id", Some(&id.into()))?;
        params.opt_boolean("include_entities", include_entities);

        let data = self.post("direct_messages/destroy", &params).await?;
        DirectMessage::from_json(&data)
    }
}
