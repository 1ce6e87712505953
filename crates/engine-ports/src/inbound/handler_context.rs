//! Inbound contract: the context every intent handler receives. Handlers
//! never reach into a transport connection directly -- the Host resolves
//! who is calling and hands the handler a `HandlerContext`.

use nightfall_domain::{RoomCode, Uid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerContext {
    pub room_code: RoomCode,
    pub caller_uid: Uid,
    pub is_host: bool,
}

impl HandlerContext {
    pub fn new(room_code: RoomCode, caller_uid: Uid, is_host: bool) -> Self {
        Self {
            room_code,
            caller_uid,
            is_host,
        }
    }
}
