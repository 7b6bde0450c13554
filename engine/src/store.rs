//! Session state storage.
//!
//! The orchestrator reads both halves of a session once at the start of a
//! turn and writes both once at the end. A missing entry is a fresh session,
//! never an error.

use std::collections::HashMap;

use kanagi_types::{LoopState, SessionId, TetraState};

/// Keyed storage for per-session loop and tetra state.
///
/// Implementations decide durability. Callers must serialize turns within one
/// session; the store itself is not asked to arbitrate concurrent writers.
pub trait SessionStore {
    fn loop_state(&self, session: &SessionId) -> Option<LoopState>;
    fn set_loop_state(&mut self, session: &SessionId, state: LoopState);
    fn tetra_state(&self, session: &SessionId) -> Option<TetraState>;
    fn set_tetra_state(&mut self, session: &SessionId, state: TetraState);
    /// Forget both halves of a session.
    fn delete(&mut self, session: &SessionId);
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn loop_state(&self, session: &SessionId) -> Option<LoopState> {
        (**self).loop_state(session)
    }

    fn set_loop_state(&mut self, session: &SessionId, state: LoopState) {
        (**self).set_loop_state(session, state);
    }

    fn tetra_state(&self, session: &SessionId) -> Option<TetraState> {
        (**self).tetra_state(session)
    }

    fn set_tetra_state(&mut self, session: &SessionId, state: TetraState) {
        (**self).set_tetra_state(session, state);
    }

    fn delete(&mut self, session: &SessionId) {
        (**self).delete(session);
    }
}

/// Process-local store backed by two maps.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    loops: HashMap<SessionId, LoopState>,
    tetras: HashMap<SessionId, TetraState>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with any stored state.
    #[must_use]
    pub fn session_count(&self) -> usize {
        let tetra_only = self
            .tetras
            .keys()
            .filter(|id| !self.loops.contains_key(*id))
            .count();
        self.loops.len() + tetra_only
    }
}

impl SessionStore for InMemorySessionStore {
    fn loop_state(&self, session: &SessionId) -> Option<LoopState> {
        self.loops.get(session).cloned()
    }

    fn set_loop_state(&mut self, session: &SessionId, state: LoopState) {
        self.loops.insert(session.clone(), state);
    }

    fn tetra_state(&self, session: &SessionId) -> Option<TetraState> {
        self.tetras.get(session).cloned()
    }

    fn set_tetra_state(&mut self, session: &SessionId, state: TetraState) {
        self.tetras.insert(session.clone(), state);
    }

    fn delete(&mut self, session: &SessionId) {
        self.loops.remove(session);
        self.tetras.remove(session);
    }
}
