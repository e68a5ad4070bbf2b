//! Bounded history of visited states.
//!
//! The history is seeded with the initial state and only ever grows through
//! accepted transitions. Once it holds `capacity` entries, each new push
//! evicts the oldest one.

use super::state::StateId;
use serde::Serialize;
use std::collections::VecDeque;

/// Ordered log of visited states, newest last.
///
/// # Example
///
/// ```rust
/// use handlerstate::core::{StateHistory, StateId};
///
/// let mut history = StateHistory::new(StateId::from("off"), 2);
/// history.push(StateId::from("on"));
/// history.push(StateId::from("off"));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.current(), &StateId::from("off"));
/// assert_eq!(history.peek(2), Some(&StateId::from("on")));
/// assert_eq!(history.peek(3), None);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct StateHistory {
    states: VecDeque<StateId>,
    capacity: usize,
}

impl StateHistory {
    /// Create a history holding only `initial`.
    ///
    /// A `capacity` of zero is raised to one, the history can never be
    /// empty.
    pub fn new(initial: StateId, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut states = VecDeque::with_capacity(capacity.min(64));
        states.push_back(initial);
        Self { states, capacity }
    }

    /// Append a state. Returns the oldest entry if it was evicted to make
    /// room.
    pub fn push(&mut self, state: StateId) -> Option<StateId> {
        self.states.push_back(state);
        if self.states.len() > self.capacity {
            self.states.pop_front()
        } else {
            None
        }
    }

    /// The most recently pushed state.
    pub fn current(&self) -> &StateId {
        // Invariant: never empty. `new` seeds one entry and `push` only
        // evicts after inserting.
        &self.states[self.states.len() - 1]
    }

    /// State `n` positions from the end; `peek(1)` is the current state.
    pub fn peek(&self, n: usize) -> Option<&StateId> {
        if n == 0 || n > self.states.len() {
            return None;
        }
        self.states.get(self.states.len() - n)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StateId> {
        self.states.iter()
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.states.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(name: &str) -> StateId {
        StateId::from(name)
    }

    #[test]
    fn new_history_holds_initial_state() {
        let history = StateHistory::new(s("idle"), 10);
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
        assert_eq!(history.current(), &s("idle"));
    }

    #[test]
    fn push_appends_without_eviction_below_capacity() {
        let mut history = StateHistory::new(s("a"), 3);
        assert_eq!(history.push(s("b")), None);
        assert_eq!(history.push(s("c")), None);
        assert_eq!(history.to_vec(), vec![s("a"), s("b"), s("c")]);
    }

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut history = StateHistory::new(s("a"), 2);
        history.push(s("b"));
        assert_eq!(history.push(s("c")), Some(s("a")));
        assert_eq!(history.to_vec(), vec![s("b"), s("c")]);
        assert_eq!(history.current(), &s("c"));
    }

    #[test]
    fn capacity_of_one_keeps_only_current() {
        let mut history = StateHistory::new(s("a"), 1);
        assert_eq!(history.push(s("b")), Some(s("a")));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &s("b"));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = StateHistory::new(s("a"), 0);
        assert_eq!(history.capacity(), 1);
        history.push(s("b"));
        assert_eq!(history.current(), &s("b"));
    }

    #[test]
    fn peek_counts_from_the_end() {
        let mut history = StateHistory::new(s("a"), 5);
        history.push(s("b"));
        history.push(s("c"));

        assert_eq!(history.peek(1), Some(&s("c")));
        assert_eq!(history.peek(2), Some(&s("b")));
        assert_eq!(history.peek(3), Some(&s("a")));
        assert_eq!(history.peek(4), None);
        assert_eq!(history.peek(0), None);
    }

    #[test]
    fn history_serializes_states_in_order() {
        let mut history = StateHistory::new(s("off"), 4);
        history.push(s("on"));

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["states"], serde_json::json!(["off", "on"]));
        assert_eq!(json["capacity"], 4);
    }
}
