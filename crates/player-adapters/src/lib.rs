//! Native `ServerConnectionPort` implementation over `tokio-tungstenite`.
//! WASM/browser transports are a distinct adapter outside this
//! scope (see `DESIGN.md`); this crate only targets desktop/native
//! clients.

pub mod websocket;

pub use websocket::TungsteniteConnectionPort;
