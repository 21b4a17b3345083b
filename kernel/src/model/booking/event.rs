use derive_new::new;

use crate::model::id::{RoomId, UserId};

// 割り当ての書き込みイベント。新規作成か部屋の付け替えかは
// 永続化層がユーザーの既存予約の有無で判断する
#[derive(Debug, Clone, Copy, new)]
pub struct AllocateBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
}
