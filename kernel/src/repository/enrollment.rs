use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::UserId;
use crate::model::ticket::EnrollmentTicket;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    // ユーザーの申込に紐づくチケットを取得する。申込・チケットの
    // いずれかが存在しない場合は None
    async fn find_ticket_by_user_id(&self, user_id: UserId)
        -> AppResult<Option<EnrollmentTicket>>;
}
