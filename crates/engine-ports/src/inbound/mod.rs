//! Inbound ports - the contract used to drive the Host.

mod handler_context;

pub use handler_context::HandlerContext;
