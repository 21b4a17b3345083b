use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::auth::AccessToken;
use crate::model::id::UserId;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンからユーザーIDを引く。無効なトークンは None
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>>;
}
