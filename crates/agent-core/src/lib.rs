//! Core abstractions for the agent demos
//!
//! This crate defines the types every other crate in the workspace builds on:
//! conversation content, events, session state, the session service trait,
//! the invocation context and the `Agent` trait.

pub mod agent;
pub mod content;
pub mod context;
pub mod error;
pub mod event;
pub mod session;
pub mod state;

pub use agent::Agent;
pub use content::{Content, FunctionCall, FunctionResponse, Part, Role};
pub use context::{EventSink, InvocationContext};
pub use error::{Error, Result};
pub use event::{Event, EventActions, USER_AUTHOR};
pub use session::{Session, SessionKey, SessionService};
pub use state::State;
