use kernel::model::booking::{Booking, BookingRoom};
use kernel::model::id::{BookingId, HotelId, RoomId, UserId};
use sqlx::types::chrono::{DateTime, Utc};

// 予約一覧・取得で使う型。部屋情報を JOIN した結果を受ける
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: i64,
    pub user_id: i64,
    pub booking_created_at: DateTime<Utc>,
    pub booking_updated_at: DateTime<Utc>,
    pub room_id: i64,
    pub hotel_id: i64,
    pub room_name: String,
    pub capacity: i32,
    pub room_created_at: DateTime<Utc>,
    pub room_updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            booking_created_at,
            booking_updated_at,
            room_id,
            hotel_id,
            room_name,
            capacity,
            room_created_at,
            room_updated_at,
        } = value;
        Booking {
            booking_id: BookingId::new(booking_id),
            booked_by: UserId::new(user_id),
            created_at: booking_created_at,
            updated_at: booking_updated_at,
            room: BookingRoom {
                room_id: RoomId::new(room_id),
                hotel_id: HotelId::new(hotel_id),
                room_name,
                capacity,
                created_at: room_created_at,
                updated_at: room_updated_at,
            },
        }
    }
}

// トランザクション内でユーザーの既存予約を確認するための型
#[derive(sqlx::FromRow)]
pub struct BookingStateRow {
    pub booking_id: i64,
    pub room_id: i64,
}
