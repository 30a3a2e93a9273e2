//! Client-side session state
//!
//! - `store`: persisted `(token, username)` pair
//! - `collection`: cached story list
//! - `context`: the logged-in user and the consistency rules tying the
//!   two together

pub mod collection;
pub mod context;
pub mod store;

pub use collection::StoryCollection;
pub use context::SessionContext;
pub use store::{
    open_store, FileSessionStore, KeyringSessionStore, MemorySessionStore, Session, SessionStore,
};
