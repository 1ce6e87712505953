//! Client Facade & Connection/Revision Tracker: the client-side
//! counterpart of the Host. Subscribes to a room over a
//! `ServerConnectionPort`, filters private messages by `toUid == myUid`,
//! tracks the latest observed revision, and exposes
//! `requestSnapshot`/`forceSync`/`connectionStatus` to a UI layer.

mod facade;
mod revision;

pub use facade::{ClientFacade, FacadeEvent};
pub use revision::{RevisionTracker, SnapshotInbox};
