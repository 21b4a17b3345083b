use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::booking::{Booking, BookingRoom};
use kernel::model::id::{BookingId, HotelId, RoomId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(range(min = 1))]
    pub room_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[garde(range(min = 1))]
    pub room_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: BookingId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by: _,
            created_at: _,
            updated_at: _,
            room,
        } = value;
        Self {
            id: booking_id,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            hotel_id,
            room_name,
            capacity,
            created_at,
            updated_at,
        } = value;
        Self {
            id: room_id,
            hotel_id,
            name: room_name,
            capacity,
            created_at,
            updated_at,
        }
    }
}
