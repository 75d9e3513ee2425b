use crate::actions::Action;
use crate::environment::types::Errors;

pub fn reduce(state: Errors, action: &Action) -> Errors {
    match action {
        Action::StoreErrors { errors } => errors.clone(),
        Action::ClearErrors => Errors::default(),
        Action::DismissGlobalAlert { index } => {
            let mut state = state;
            if *index < state.global_errors.len() {
                state.global_errors.remove(*index);
            }
            state
        }
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{clear_errors_action, dismiss_global_alert_action, store_errors_action};
    use crate::environment::types::GlobalError;

    fn errors() -> Errors {
        Errors {
            field_errors: vec![],
            global_errors: vec![
                GlobalError {
                    message: "first".to_string(),
                },
                GlobalError {
                    message: "second".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_dismiss_global_alert() {
        let state = reduce(Errors::default(), &store_errors_action(errors()));
        let state = reduce(state, &dismiss_global_alert_action(0));
        assert_eq!(state.global_errors.len(), 1);
        assert_eq!(state.global_errors[0].message, "second");
        let state = reduce(state, &dismiss_global_alert_action(5));
        assert_eq!(state.global_errors.len(), 1);
    }

    #[test]
    fn test_clear_errors() {
        let state = reduce(errors(), &clear_errors_action());
        assert!(state.is_empty());
    }
}
