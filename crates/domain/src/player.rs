//! Player entity.

use serde::{Deserialize, Serialize};

use crate::ids::{Seat, Uid};
use crate::role::RoleId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub uid: Uid,
    pub seat: Seat,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<RoleId>,
    pub has_viewed_role: bool,
}

impl Player {
    pub fn new(uid: Uid, seat: Seat) -> Self {
        Self {
            uid,
            seat,
            display_name: None,
            avatar_url: None,
            role: None,
            has_viewed_role: false,
        }
    }
}
