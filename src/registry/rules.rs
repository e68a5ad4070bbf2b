//! Registration rules, evaluated with `Validation` so that every violated
//! rule is reported at once.

use crate::core::{ChangeName, Handler, HandlerSpec};
use crate::registry::violations::RegistrationError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<RegistrationError>>;

/// Check `spec` against the handlers already registered.
///
/// Custom changes must name both ends, and a `(change, from)` pair may only
/// ever lead to one destination. `enter` needs a destination, `leave` a
/// source; core changes are exempt from the single-destination rule.
pub fn validate(spec: &HandlerSpec, existing: &[Handler]) -> Check {
    let checks = match &spec.change {
        ChangeName::Enter => vec![require_destination(spec)],
        ChangeName::Leave => vec![require_source(spec)],
        ChangeName::Custom(_) => vec![
            require_source(spec),
            require_destination(spec),
            single_destination(spec, existing),
        ],
    };

    Validation::all_vec(checks).map(|_| ())
}

fn require_source(spec: &HandlerSpec) -> Check {
    if spec.from.is_some() {
        Validation::success(())
    } else {
        Validation::fail(RegistrationError::MissingSource {
            change: spec.change.clone(),
        })
    }
}

fn require_destination(spec: &HandlerSpec) -> Check {
    if spec.to.is_some() {
        Validation::success(())
    } else {
        Validation::fail(RegistrationError::MissingDestination {
            change: spec.change.clone(),
        })
    }
}

fn single_destination(spec: &HandlerSpec, existing: &[Handler]) -> Check {
    let conflicting = existing
        .iter()
        .filter(|h| h.change == spec.change && h.from == spec.from)
        .find(|h| h.to != spec.to);

    match conflicting {
        Some(handler) => Validation::fail(RegistrationError::DestinationConflict {
            change: spec.change.clone(),
            from: spec.from.clone(),
            existing: handler.to.clone(),
            requested: spec.to.clone(),
        }),
        None => Validation::success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Callback, HandlerId, StateId};

    fn spec(change: &str, from: Option<&str>, to: Option<&str>) -> HandlerSpec {
        HandlerSpec {
            change: ChangeName::parse(change),
            from: from.map(StateId::from),
            to: to.map(StateId::from),
            callback: Callback::infallible(|| {}),
            priority: None,
            comment: None,
        }
    }

    fn stored(change: &str, from: Option<&str>, to: Option<&str>) -> Handler {
        Handler::from_spec(HandlerId(0), spec(change, from, to))
    }

    #[test]
    fn well_formed_custom_handler_passes() {
        let result = validate(&spec("switch", Some("off"), Some("on")), &[]);
        assert!(result.is_success());
    }

    #[test]
    fn same_destination_is_accepted_twice() {
        let existing = vec![stored("switch", Some("on"), Some("off"))];
        let result = validate(&spec("switch", Some("on"), Some("off")), &existing);
        assert!(result.is_success());
    }

    #[test]
    fn conflicting_destination_is_rejected() {
        let existing = vec![stored("switch", Some("off"), Some("on"))];
        let result = validate(&spec("switch", Some("off"), Some("broken")), &existing);

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    RegistrationError::DestinationConflict { existing: Some(to), .. }
                        if to.as_str() == "on"
                )));
            }
            Validation::Success(_) => panic!("Expected conflict, got success"),
        }
    }

    #[test]
    fn other_sources_do_not_conflict() {
        let existing = vec![stored("switch", Some("off"), Some("on"))];
        let result = validate(&spec("switch", Some("on"), Some("off")), &existing);
        assert!(result.is_success());
    }

    #[test]
    fn custom_handler_accumulates_all_violations() {
        let existing = vec![stored("switch", None, Some("on"))];
        let result = validate(&spec("switch", None, None), &existing);

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                let has_source = errors
                    .iter()
                    .any(|e| matches!(e, RegistrationError::MissingSource { .. }));
                let has_destination = errors
                    .iter()
                    .any(|e| matches!(e, RegistrationError::MissingDestination { .. }));
                let has_conflict = errors
                    .iter()
                    .any(|e| matches!(e, RegistrationError::DestinationConflict { .. }));

                assert!(has_source);
                assert!(has_destination);
                assert!(has_conflict);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn core_changes_skip_single_destination_rule() {
        let existing = vec![stored("enter", None, Some("on"))];
        assert!(validate(&spec("enter", None, Some("on")), &existing).is_success());
        assert!(validate(&spec("leave", Some("on"), None), &existing).is_success());
    }

    #[test]
    fn core_changes_need_their_own_end() {
        assert!(validate(&spec("enter", Some("on"), None), &[]).is_failure());
        assert!(validate(&spec("leave", None, Some("on")), &[]).is_failure());
    }
}
