//! Per-turn orchestration for Kanagi.
//!
//! [`CorePlanBuilder`] reads a session's state from an injected
//! [`SessionStore`], runs the reasoning core, writes the state back and
//! returns a [`kanagi_types::CorePlan`].

mod builder;
pub mod drafts;
mod store;

pub use builder::{CorePlanBuilder, TurnInput};
pub use store::{InMemorySessionStore, SessionStore};
