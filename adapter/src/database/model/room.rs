use kernel::model::id::RoomId;
use kernel::model::room::RoomOccupancy;

#[derive(sqlx::FromRow)]
pub struct RoomOccupancyRow {
    pub room_id: i64,
    pub capacity: i32,
    pub occupants: i64,
}

impl From<RoomOccupancyRow> for RoomOccupancy {
    fn from(value: RoomOccupancyRow) -> Self {
        let RoomOccupancyRow {
            room_id,
            capacity,
            occupants,
        } = value;
        RoomOccupancy {
            room_id: RoomId::new(room_id),
            capacity,
            occupants,
        }
    }
}
