use axum::extract::{Path, State};
use axum::Json;
use garde::Validate;

use kernel::model::id::{BookingId, RoomId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::booking::{
    BookingIdResponse, BookingResponse, CreateBookingRequest, UpdateBookingRequest,
};

// 自身の予約を部屋情報込みで取得する
pub async fn show_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .find_by_user_id(user.id())
        .await
        .map(BookingResponse::from)
        .map(Json)
}

// 部屋を予約する
pub async fn book_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;

    registry
        .booking_service()
        .allocate(user.id(), RoomId::new(req.room_id))
        .await
        .map(|booking| {
            Json(BookingIdResponse {
                booking_id: booking.booking_id,
            })
        })
}

// 既存予約の部屋を変更する
pub async fn change_booking_room(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;

    registry
        .booking_service()
        .reallocate(user.id(), booking_id, RoomId::new(req.room_id))
        .await
        .map(|booking| {
            Json(BookingIdResponse {
                booking_id: booking.booking_id,
            })
        })
}
