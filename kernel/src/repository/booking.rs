use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::booking::event::AllocateBooking;
use crate::model::booking::Booking;
use crate::model::id::UserId;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ユーザーの現在の予約を部屋情報込みで取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    // 割り当て操作を行う。空き確認と書き込みは同一のトランザクション内で
    // 行われ、並行する割り当てが定員を超えることはない
    async fn allocate(&self, event: AllocateBooking) -> AppResult<Booking>;
}
