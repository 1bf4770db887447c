//! Interactive front end.

pub mod cli;

pub use cli::{Session, SessionConfig, SessionError, SessionResult};
