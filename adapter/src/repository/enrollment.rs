use async_trait::async_trait;
use derive_new::new;

use kernel::model::id::UserId;
use kernel::model::ticket::EnrollmentTicket;
use kernel::repository::enrollment::EnrollmentRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::ticket::EnrollmentTicketRow;
use crate::database::ConnectionPool;

#[derive(new)]
pub struct EnrollmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryImpl {
    // 申込 → チケット → チケット種別の順にたどり、最新のチケットを返す。
    // 申込もチケットも無いユーザーは None
    async fn find_ticket_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentTicket>> {
        let row: Option<EnrollmentTicketRow> = sqlx::query_as(
            r#"
            SELECT
                t.ticket_id,
                t.status,
                tt.is_remote,
                tt.includes_room
            FROM enrollments AS e
            INNER JOIN tickets AS t ON t.enrollment_id = e.enrollment_id
            INNER JOIN ticket_types AS tt ON tt.ticket_type_id = t.ticket_type_id
            WHERE e.user_id = $1
            ORDER BY t.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(EnrollmentTicket::try_from).transpose()
    }
}
