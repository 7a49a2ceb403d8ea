//! # Conversation Graph Model
//!
//! Plain DTOs shared by the store, the builder and the statistics layer.
//!
//! Design rule: nothing here knows about message-store internals. Whatever
//! a store attaches to messages or speakers travels as a `PropertyMap`.
//! This module is pure data: no I/O, no state.

pub mod node;
pub mod hypernode;
pub mod message;
pub mod value;
pub mod property_map;

pub use node::{Node, VertexId};
pub use hypernode::Hypernode;
pub use message::{Message, Speaker};
pub use value::Value;
pub use property_map::{PropertyMap, props};
