//! Decides whether a requested change is a legal transition.

use crate::core::{ChangeName, StateHistory, StateId};
use crate::registry::HandlerRegistry;

/// A transition the engine has agreed to run.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedTransition {
    pub change: ChangeName,
    pub from: StateId,
    pub to: StateId,
}

/// Outcome of resolving a change against the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// `enter`/`leave` requested directly; never allowed.
    CoreChange { change: ChangeName, state: StateId },

    /// Current state has no handler for this change.
    Unhandled { change: ChangeName, state: StateId },

    Accepted(PlannedTransition),
}

/// Read-only view over registry and history used for resolution.
pub struct TransitionResolver<'a> {
    registry: &'a HandlerRegistry,
    history: &'a StateHistory,
}

impl<'a> TransitionResolver<'a> {
    pub fn new(registry: &'a HandlerRegistry, history: &'a StateHistory) -> Self {
        Self { registry, history }
    }

    pub fn resolve(&self, change: &ChangeName) -> Resolution {
        let from = self.history.current();

        if change.is_core() {
            return Resolution::CoreChange {
                change: change.clone(),
                state: from.clone(),
            };
        }

        // The registry guarantees every handler for (change, from) shares
        // one destination, so the first match decides.
        let Some(handler) = self.registry.find_change(change, from) else {
            return Resolution::Unhandled {
                change: change.clone(),
                state: from.clone(),
            };
        };

        match &handler.to {
            Some(to) => Resolution::Accepted(PlannedTransition {
                change: change.clone(),
                from: from.clone(),
                to: to.clone(),
            }),
            None => Resolution::Unhandled {
                change: change.clone(),
                state: from.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Callback, HandlerSpec};

    fn registry_with(handlers: &[(&str, Option<&str>, Option<&str>)]) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        for (change, from, to) in handlers {
            registry
                .add(HandlerSpec {
                    change: ChangeName::parse(change),
                    from: from.map(StateId::from),
                    to: to.map(StateId::from),
                    callback: Callback::infallible(|| {}),
                    priority: None,
                    comment: None,
                })
                .unwrap();
        }
        registry
    }

    #[test]
    fn core_changes_are_rejected() {
        let registry = registry_with(&[("enter", None, Some("off")), ("leave", Some("off"), None)]);
        let history = StateHistory::new(StateId::from("off"), 10);
        let resolver = TransitionResolver::new(&registry, &history);

        for change in [ChangeName::Enter, ChangeName::Leave] {
            assert_eq!(
                resolver.resolve(&change),
                Resolution::CoreChange {
                    change: change.clone(),
                    state: StateId::from("off"),
                }
            );
        }
    }

    #[test]
    fn unknown_change_is_unhandled() {
        let registry = registry_with(&[("switch", Some("on"), Some("off"))]);
        let history = StateHistory::new(StateId::from("off"), 10);

        let resolution = TransitionResolver::new(&registry, &history).resolve(&"switch".into());

        assert!(matches!(resolution, Resolution::Unhandled { state, .. } if state.as_str() == "off"));
    }

    #[test]
    fn registered_change_resolves_destination() {
        let registry = registry_with(&[
            ("switch", Some("off"), Some("on")),
            ("switch", Some("on"), Some("off")),
        ]);
        let history = StateHistory::new(StateId::from("off"), 10);

        let resolution = TransitionResolver::new(&registry, &history).resolve(&"switch".into());

        assert_eq!(
            resolution,
            Resolution::Accepted(PlannedTransition {
                change: ChangeName::parse("switch"),
                from: StateId::from("off"),
                to: StateId::from("on"),
            })
        );
    }
}
