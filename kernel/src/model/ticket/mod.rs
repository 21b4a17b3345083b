use strum::EnumString;

use crate::model::id::TicketId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

// 申込に紐づくチケットの状態。予約可否の判定にのみ使う
#[derive(Debug, Clone)]
pub struct EnrollmentTicket {
    pub ticket_id: TicketId,
    pub status: TicketStatus,
    pub is_remote: bool,
    pub includes_room: bool,
}

impl EnrollmentTicket {
    // 支払い済み、かつ宿泊を含む現地参加チケットのみ予約できる
    pub fn grants_room_booking(&self) -> bool {
        self.status == TicketStatus::Paid && !self.is_remote && self.includes_room
    }
}
