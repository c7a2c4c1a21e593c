use super::PageOptions;
use crate::api::ApiClient;
use crate::cursor::Cursor;
use crate::error::TwitterResult;
use crate::models::{Entity, List};
use crate::params::{ListRef, Params, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Public,
    Private,
}

impl ListMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListMode::Public => "public",
            ListMode::Private => "private",
        }
    }
}

impl ApiClient {
    pub async fn create_list(
        &self,
        name: &str,
        mode: Option<ListMode>,
        description: Option<&str>,
    ) -> TwitterResult<List> {
        let mut params = Params::new();
        params
            .set("name", name)
            .set_opt("mode", mode.map(|m| m.as_str()))
            .set_opt("description", description);

        let data = self.post("lists/create", &params).await?;
        List::from_json(&data)
    }

    pub async fn destroy_list(&self, list: &ListRef) -> TwitterResult<List> {
        self.list_action("lists/destroy", list).await
    }

    /// Subscribes the authenticating user to `list`.
    pub async fn create_subscription(&self, list: &ListRef) -> TwitterResult<List> {
        self.list_action("lists/subscribers/create", list).await
    }

    pub async fn destroy_subscription(&self, list: &ListRef) -> TwitterResult<List> {
        self.list_action("lists/subscribers/destroy", list).await
    }

    async fn list_action(&self, resource: &str, list: &ListRef) -> TwitterResult<List> {
        self.require_auth()?;
        let mut params = Params::new();
        list.apply(&mut params)?;

        let data = self.post(resource, &params).await?;
        List::from_json(&data)
    }

    /// Lists `user` subscribes to.
    pub fn subscriptions(
        &self,
        user: &UserRef,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, List>> {
        self.list_pager("lists/subscriptions", user, opts)
    }

    /// Lists owned by `user`.
    pub fn lists(&self, user: &UserRef, opts: &PageOptions) -> TwitterResult<Cursor<'_, List>> {
        self.list_pager("lists/ownerships", user, opts)
    }

    fn list_pager(
        &self,
        resource: &'static str,
        user: &UserRef,
        opts: &PageOptions,
    ) -> TwitterResult<Cursor<'_, List>> {
        self.require_auth()?;
        let mut params = Params::new();
        user.apply(&mut params, "")?;
        let start = opts.apply(&mut params)?;
        Ok(Cursor::new(self, resource, "lists", params, start, List::from_json))
    }
}
