// Use cases layer: application workflows for the shooter server.

pub mod account;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use session::{SessionHandle, SessionSettings, spawn_session};
pub use types::{SessionCommand, SessionNotice, SessionView};
