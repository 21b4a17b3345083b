use crate::model::id::RoomId;

// 部屋の定員と現在の予約数を1つのスナップショットとして保持する型
#[derive(Debug, Clone, Copy)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub capacity: i32,
    pub occupants: i64,
}

impl RoomOccupancy {
    // 空きの判定。リクエストしたユーザー自身がすでにこの部屋を
    // 予約している場合、その1件は予約数に数えない
    pub fn admits(&self, requester_already_in_room: bool) -> bool {
        let occupants_beside_requester =
            self.occupants - i64::from(requester_already_in_room);
        occupants_beside_requester < i64::from(self.capacity)
    }
}
