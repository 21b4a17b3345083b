use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::RoomId;
use crate::model::room::RoomOccupancy;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    // 定員と現在の予約数を一貫したスナップショットで取得する。
    // 部屋が存在しない場合は None
    async fn find_occupancy(&self, room_id: RoomId) -> AppResult<Option<RoomOccupancy>>;
}
