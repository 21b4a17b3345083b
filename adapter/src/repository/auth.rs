use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;

use kernel::model::auth::AccessToken;
use kernel::model::id::UserId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::redis::RedisClient;

// セッションは外部の認証サービスが書き込む。ここでは参照のみ
#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let value = self.kv.get(&access_token.session_key()).await?;
        value
            .map(|raw| {
                raw.parse::<i64>().map(UserId::new).map_err(|e| {
                    AppError::ConversionEntityError(format!(
                        "セッションの内容をユーザーIDに変換できませんでした：{e}"
                    ))
                })
            })
            .transpose()
    }
}
