use async_trait::async_trait;
use derive_new::new;

use kernel::model::booking::event::AllocateBooking;
use kernel::model::booking::Booking;
use kernel::model::id::UserId;
use kernel::model::room::RoomOccupancy;
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::booking::{BookingRow, BookingStateRow};
use crate::database::ConnectionPool;

// 直列化失敗時の再試行上限
const MAX_ALLOCATE_ATTEMPTS: u32 = 3;

const SERIALIZATION_FAILURE: &str = "40001";
const UNIQUE_VIOLATION: &str = "23505";

const BOOKING_WITH_ROOM_COLUMNS: &str = r#"
    b.booking_id,
    b.user_id,
    b.created_at AS booking_created_at,
    b.updated_at AS booking_updated_at,
    r.room_id,
    r.hotel_id,
    r.room_name,
    r.capacity,
    r.created_at AS room_created_at,
    r.updated_at AS room_updated_at
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_WITH_ROOM_COLUMNS}
            FROM bookings AS b
            INNER JOIN rooms AS r ON b.room_id = r.room_id
            WHERE b.user_id = $1
            "#
        ))
        .bind(user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Booking::from))
        .map_err(AppError::SpecificOperationError)
    }

    // 割り当て操作を行う。空き確認と書き込みは直列化可能トランザクション
    // 内で行い、競合して中断された場合は上限回数まで再試行する
    async fn allocate(&self, event: AllocateBooking) -> AppResult<Booking> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.try_allocate(event).await {
                Err(e) if is_allocation_conflict(&e) => {
                    if attempts >= MAX_ALLOCATE_ATTEMPTS {
                        return Err(AppError::TransactionConflict(format!(
                            "部屋（{}）への割り当てが競合したため中断しました。",
                            event.room_id
                        )));
                    }
                    tracing::warn!(
                        room_id = %event.room_id,
                        attempts,
                        "allocation conflicted, retrying"
                    );
                }
                other => return other,
            }
        }
    }
}

impl BookingRepositoryImpl {
    async fn try_allocate(&self, event: AllocateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 書き込み前のチェックとして、以下を同一トランザクション内で調べる。
        // - 指定の部屋 ID をもつ部屋が存在するか
        // - 部屋に空きがあるか（ユーザー自身の既存予約は数えない）
        //
        // 上記の両方が Yes だった場合のみ書き込みに進む
        let booking_id = {
            let room: Option<(i64, i32)> =
                sqlx::query_as(r#"SELECT room_id, capacity FROM rooms WHERE room_id = $1"#)
                    .bind(event.room_id.raw())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let Some((_, capacity)) = room else {
                return Err(AppError::EntityNotFound(format!(
                    "部屋（{}）が見つかりませんでした。",
                    event.room_id
                )));
            };

            let current: Option<BookingStateRow> =
                sqlx::query_as(r#"SELECT booking_id, room_id FROM bookings WHERE user_id = $1"#)
                    .bind(event.user_id.raw())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let occupants: i64 =
                sqlx::query_scalar(r#"SELECT COUNT(*) FROM bookings WHERE room_id = $1"#)
                    .bind(event.room_id.raw())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let occupancy = RoomOccupancy {
                room_id: event.room_id,
                capacity,
                occupants,
            };
            let already_in_room = current
                .as_ref()
                .is_some_and(|state| state.room_id == event.room_id.raw());
            if !occupancy.admits(already_in_room) {
                return Err(AppError::ForbiddenOperation(format!(
                    "部屋（{}）に空きがありません。",
                    event.room_id
                )));
            }

            // 既存予約があれば部屋の付け替え、なければ新規作成
            match current {
                Some(state) => {
                    let res = sqlx::query(
                        r#"
                        UPDATE bookings
                        SET room_id = $1, updated_at = CURRENT_TIMESTAMP
                        WHERE booking_id = $2
                        "#,
                    )
                    .bind(event.room_id.raw())
                    .bind(state.booking_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

                    if res.rows_affected() < 1 {
                        return Err(AppError::NoRowsAffectedError(
                            "No booking record has been updated".into(),
                        ));
                    }
                    state.booking_id
                }
                None => sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO bookings (user_id, room_id)
                    VALUES ($1, $2)
                    RETURNING booking_id
                    "#,
                )
                .bind(event.user_id.raw())
                .bind(event.room_id.raw())
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?,
            }
        };

        let booking = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_WITH_ROOM_COLUMNS}
            FROM bookings AS b
            INNER JOIN rooms AS r ON b.room_id = r.room_id
            WHERE b.booking_id = $1
            "#
        ))
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map(Booking::from)
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking)
    }

    // allocate でのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

// 直列化失敗（40001）と、同一ユーザーの同時作成による一意制約違反
// （23505）を再試行対象とする。後者は再試行時に既存予約が見えるため
// 付け替えとして解決される
fn is_allocation_conflict(err: &AppError) -> bool {
    match err {
        AppError::SpecificOperationError(e) | AppError::TransactionError(e) => e
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == SERIALIZATION_FAILURE || code == UNIQUE_VIOLATION),
        _ => false,
    }
}
