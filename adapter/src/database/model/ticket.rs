use kernel::model::id::TicketId;
use kernel::model::ticket::{EnrollmentTicket, TicketStatus};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct EnrollmentTicketRow {
    pub ticket_id: i64,
    pub status: String,
    pub is_remote: bool,
    pub includes_room: bool,
}

impl TryFrom<EnrollmentTicketRow> for EnrollmentTicket {
    type Error = AppError;

    fn try_from(value: EnrollmentTicketRow) -> Result<Self, Self::Error> {
        let EnrollmentTicketRow {
            ticket_id,
            status,
            is_remote,
            includes_room,
        } = value;
        let status = status.parse::<TicketStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!("不明なチケット状態です：{status}"))
        })?;
        Ok(EnrollmentTicket {
            ticket_id: TicketId::new(ticket_id),
            status,
            is_remote,
            includes_room,
        })
    }
}
