//! Session state, access control, request classification, operation
//! handlers, and publication emission (§3, §4.4–§4.7, §5, §7).

pub mod access;
pub mod classify;
mod engine;
pub mod handlers;
pub mod publish;
pub mod session;
mod wire;

pub use access::{check_access, Operation};
pub use classify::{Encoding, OperationKind};
pub use engine::Engine;
pub use session::{AuthLevel, Password, Session};
