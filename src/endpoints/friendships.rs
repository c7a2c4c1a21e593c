use crate::api::ApiClient;
use crate::error::TwitterResult;
use crate::models::{Entity, User};
use crate::params::{Params, UserRef};

impl ApiClient {
    /// Follows `user`; `follow` also turns on device notifications for them.
    pub async fn create_friendship(&self, user: &UserRef, follow: bool) -> TwitterResult<User> {
        let mut params = Params::new();
        user.apply(&mut params, "")?;
        params.boolean("follow", follow);

        let data = self.post("friendships/create", &params).await?;
        User::from_json(&data)
    }

    pub async fn destroy_friendship(&self, user: &UserRef) -> TwitterResult<User> {
        let mut params = Params::new();
        user.apply(&mut params, "")?;

        let data = self.post("friendships/destroy", &params).await?;
        User::from_json(&data)
    }
}
