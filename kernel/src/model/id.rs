use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($id:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $id(i64);

        impl $id {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn raw(self) -> i64 {
                self.0
            }

            // システム・オブ・レコードの採番は正の整数
            pub const fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $id {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $id {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(UserId);
define_id!(HotelId);
define_id!(RoomId);
define_id!(BookingId);
define_id!(EnrollmentId);
define_id!(TicketId);
