//! Transport adapters. Routes through typed `ServerEnvelope`s end to end,
//! never untyped JSON maps.

pub mod websocket;
