//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the backend API.

mod backend;

pub use backend::{Backend, LoginReply, MessageReply};
