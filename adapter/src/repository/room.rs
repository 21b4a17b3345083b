use async_trait::async_trait;
use derive_new::new;

use kernel::model::id::RoomId;
use kernel::model::room::RoomOccupancy;
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::room::RoomOccupancyRow;
use crate::database::ConnectionPool;

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    // 定員と現在の予約数を1クエリのスナップショットで取得する
    async fn find_occupancy(&self, room_id: RoomId) -> AppResult<Option<RoomOccupancy>> {
        sqlx::query_as::<_, RoomOccupancyRow>(
            r#"
            SELECT
                r.room_id,
                r.capacity,
                COUNT(b.booking_id) AS occupants
            FROM rooms AS r
            LEFT JOIN bookings AS b ON b.room_id = r.room_id
            WHERE r.room_id = $1
            GROUP BY r.room_id, r.capacity
            "#,
        )
        .bind(room_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(RoomOccupancy::from))
        .map_err(AppError::SpecificOperationError)
    }
}
