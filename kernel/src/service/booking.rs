use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::booking::event::AllocateBooking;
use crate::model::booking::Booking;
use crate::model::id::{BookingId, RoomId, UserId};
use crate::repository::booking::BookingRepository;
use crate::repository::enrollment::EnrollmentRepository;
use crate::repository::room::RoomRepository;

// 部屋割り当てのユースケースを担うサービス。
// チケット確認 → 部屋の解決 → 空き確認 → 書き込み の順に進み、
// 空き確認と書き込みの不可分性は BookingRepository::allocate が保証する
#[derive(new)]
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
    enrollment_repository: Arc<dyn EnrollmentRepository>,
}

impl BookingService {
    // 部屋を割り当てる。ユーザーに既存の予約があれば部屋の付け替え、
    // なければ新規作成となる
    pub async fn allocate(&self, user_id: UserId, room_id: RoomId) -> AppResult<Booking> {
        if !room_id.is_valid() {
            return Err(AppError::UnprocessableEntity(format!(
                "部屋ID（{room_id}）が不正です。"
            )));
        }

        // チケット確認が最初のゲート。部屋の存在確認より先に行う
        self.ensure_eligible(user_id).await?;

        let occupancy = self
            .room_repository
            .find_occupancy(room_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("部屋（{room_id}）が見つかりませんでした。"))
            })?;

        let current = self.booking_repository.find_by_user_id(user_id).await?;
        let already_in_room = current
            .as_ref()
            .is_some_and(|booking| booking.room.room_id == room_id);

        // ここでの空き確認は早期リジェクトのためのもので、
        // 書き込み時にトランザクション内で再評価される
        if !occupancy.admits(already_in_room) {
            return Err(AppError::ForbiddenOperation(format!(
                "部屋（{room_id}）に空きがありません。"
            )));
        }

        self.booking_repository
            .allocate(AllocateBooking::new(user_id, room_id))
            .await
    }

    // 既存予約の部屋を変更する。変更できるのは自身の予約のみ
    pub async fn reallocate(
        &self,
        user_id: UserId,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> AppResult<Booking> {
        if !booking_id.is_valid() {
            return Err(AppError::UnprocessableEntity(format!(
                "予約ID（{booking_id}）が不正です。"
            )));
        }

        let current = self.booking_repository.find_by_user_id(user_id).await?;
        match current {
            Some(booking) if booking.booking_id == booking_id => {
                self.allocate(user_id, room_id).await
            }
            _ => Err(AppError::ForbiddenOperation(
                "自身の予約以外は変更できません。".into(),
            )),
        }
    }

    pub async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("予約が見つかりませんでした。".into()))
    }

    async fn ensure_eligible(&self, user_id: UserId) -> AppResult<()> {
        let ticket = self
            .enrollment_repository
            .find_ticket_by_user_id(user_id)
            .await?;
        match ticket {
            Some(ticket) if ticket.grants_room_booking() => Ok(()),
            _ => Err(AppError::ForbiddenOperation(
                "宿泊対象の支払い済みチケットがありません。".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::booking::BookingRoom;
    use crate::model::id::{HotelId, TicketId};
    use crate::model::room::RoomOccupancy;
    use crate::model::ticket::{EnrollmentTicket, TicketStatus};
    use crate::repository::booking::MockBookingRepository;
    use crate::repository::enrollment::MockEnrollmentRepository;
    use crate::repository::room::MockRoomRepository;

    fn service(
        bookings: MockBookingRepository,
        rooms: MockRoomRepository,
        enrollments: MockEnrollmentRepository,
    ) -> BookingService {
        BookingService::new(Arc::new(bookings), Arc::new(rooms), Arc::new(enrollments))
    }

    fn paid_ticket() -> EnrollmentTicket {
        EnrollmentTicket {
            ticket_id: TicketId::new(1),
            status: TicketStatus::Paid,
            is_remote: false,
            includes_room: true,
        }
    }

    fn booking(booking_id: i64, user_id: i64, room_id: i64) -> Booking {
        let now = Utc::now();
        Booking {
            booking_id: BookingId::new(booking_id),
            booked_by: UserId::new(user_id),
            created_at: now,
            updated_at: now,
            room: BookingRoom {
                room_id: RoomId::new(room_id),
                hotel_id: HotelId::new(1),
                room_name: "201号室".into(),
                capacity: 3,
                created_at: now,
                updated_at: now,
            },
        }
    }

    fn occupancy(room_id: i64, capacity: i32, occupants: i64) -> RoomOccupancy {
        RoomOccupancy {
            room_id: RoomId::new(room_id),
            capacity,
            occupants,
        }
    }

    #[tokio::test]
    async fn non_positive_room_id_is_rejected_without_any_lookup() {
        let service = service(
            MockBookingRepository::new(),
            MockRoomRepository::new(),
            MockEnrollmentRepository::new(),
        );

        let res = service.allocate(UserId::new(1), RoomId::new(0)).await;

        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn ineligible_user_is_rejected_before_room_resolution() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(None));

        // 部屋側のモックには期待を設定しない。存在しない部屋を指定しても
        // 参照されないまま拒否されることを確認する
        let service = service(
            MockBookingRepository::new(),
            MockRoomRepository::new(),
            enrollments,
        );

        let res = service.allocate(UserId::new(1), RoomId::new(999)).await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn unpaid_ticket_is_rejected() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_find_ticket_by_user_id().returning(|_| {
            Ok(Some(EnrollmentTicket {
                status: TicketStatus::Reserved,
                ..paid_ticket()
            }))
        });

        let service = service(
            MockBookingRepository::new(),
            MockRoomRepository::new(),
            enrollments,
        );

        let res = service.allocate(UserId::new(1), RoomId::new(1)).await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn remote_only_ticket_is_rejected() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_find_ticket_by_user_id().returning(|_| {
            Ok(Some(EnrollmentTicket {
                is_remote: true,
                ..paid_ticket()
            }))
        });

        let service = service(
            MockBookingRepository::new(),
            MockRoomRepository::new(),
            enrollments,
        );

        let res = service.allocate(UserId::new(1), RoomId::new(1)).await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found_for_an_eligible_user() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(Some(paid_ticket())));

        let mut rooms = MockRoomRepository::new();
        rooms.expect_find_occupancy().returning(|_| Ok(None));

        let service = service(MockBookingRepository::new(), rooms, enrollments);

        let res = service.allocate(UserId::new(1), RoomId::new(999)).await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn full_room_is_rejected_as_forbidden() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(Some(paid_ticket())));

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find_occupancy()
            .returning(|_| Ok(Some(occupancy(1, 3, 3))));

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_user_id().returning(|_| Ok(None));

        let service = service(bookings, rooms, enrollments);

        let res = service.allocate(UserId::new(4), RoomId::new(1)).await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn first_allocation_creates_a_booking() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(Some(paid_ticket())));

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find_occupancy()
            .returning(|_| Ok(Some(occupancy(1, 3, 0))));

        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_user_id().returning(|_| Ok(None));
        bookings
            .expect_allocate()
            .returning(|event| Ok(booking(10, event.user_id.raw(), event.room_id.raw())));

        let service = service(bookings, rooms, enrollments);

        let res = service.allocate(UserId::new(1), RoomId::new(1)).await.unwrap();

        assert_eq!(res.booked_by, UserId::new(1));
        assert_eq!(res.room.room_id, RoomId::new(1));
    }

    #[tokio::test]
    async fn existing_booking_is_moved_to_the_requested_room() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(Some(paid_ticket())));

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find_occupancy()
            .returning(|_| Ok(Some(occupancy(2, 3, 1))));

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(booking(10, 1, 1))));
        bookings
            .expect_allocate()
            .returning(|event| Ok(booking(10, event.user_id.raw(), event.room_id.raw())));

        let service = service(bookings, rooms, enrollments);

        let res = service.allocate(UserId::new(1), RoomId::new(2)).await.unwrap();

        assert_eq!(res.booking_id, BookingId::new(10));
        assert_eq!(res.room.room_id, RoomId::new(2));
    }

    #[tokio::test]
    async fn moving_to_the_currently_booked_room_passes_the_vacancy_gate() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_ticket_by_user_id()
            .returning(|_| Ok(Some(paid_ticket())));

        // 満室だが、1件は自身の予約
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find_occupancy()
            .returning(|_| Ok(Some(occupancy(1, 1, 1))));

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(booking(10, 1, 1))));
        bookings
            .expect_allocate()
            .returning(|event| Ok(booking(10, event.user_id.raw(), event.room_id.raw())));

        let service = service(bookings, rooms, enrollments);

        let res = service.allocate(UserId::new(1), RoomId::new(1)).await;

        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn reallocate_rejects_non_positive_booking_id() {
        let service = service(
            MockBookingRepository::new(),
            MockRoomRepository::new(),
            MockEnrollmentRepository::new(),
        );

        let res = service
            .reallocate(UserId::new(1), BookingId::new(0), RoomId::new(1))
            .await;

        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn reallocate_without_own_booking_is_forbidden() {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_user_id().returning(|_| Ok(None));

        let service = service(
            bookings,
            MockRoomRepository::new(),
            MockEnrollmentRepository::new(),
        );

        let res = service
            .reallocate(UserId::new(1), BookingId::new(10), RoomId::new(1))
            .await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn reallocate_of_a_booking_the_user_does_not_own_is_forbidden() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_user_id()
            .returning(|_| Ok(Some(booking(10, 1, 1))));

        let service = service(
            bookings,
            MockRoomRepository::new(),
            MockEnrollmentRepository::new(),
        );

        let res = service
            .reallocate(UserId::new(1), BookingId::new(99), RoomId::new(2))
            .await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn find_by_user_id_without_booking_is_not_found() {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_user_id().returning(|_| Ok(None));

        let service = service(
            bookings,
            MockRoomRepository::new(),
            MockEnrollmentRepository::new(),
        );

        let res = service.find_by_user_id(UserId::new(1)).await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }
}
