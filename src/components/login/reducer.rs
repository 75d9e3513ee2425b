use crate::actions::{login_request_action, signup_request_action, Action};
use crate::environment::model::{LOGIN_PATH, SIGNUP_PATH};
use crate::environment::types::{Errors, Link, LoginInfo, Route, SignupInfo};
use crate::environment::Environment;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum FormKind {
    #[default]
    Login,
    Signup,
}

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct LoginState {
    pub kind: FormKind,
    pub email: String,
    pub password: String,
}

impl LoginState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LoginAction {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    /// The "Sign up" leading link under the login form
    ActionRegister,
}

pub fn reduce(
    action: LoginAction,
    state: &mut LoginState,
    environment: &Environment,
) -> Option<Action> {
    log::trace!("{action:?}");
    match action {
        LoginAction::EmailChanged(email) => {
            state.email = email;
            None
        }
        LoginAction::PasswordChanged(password) => {
            state.password = password;
            None
        }
        LoginAction::Submit => Some(match state.kind {
            FormKind::Login => login_request_action(
                Link::new(LOGIN_PATH),
                LoginInfo {
                    email: state.email.clone(),
                    password: state.password.clone(),
                },
            ),
            FormKind::Signup => signup_request_action(
                Link::new(SIGNUP_PATH),
                SignupInfo {
                    email: state.email.clone(),
                    password: state.password.clone(),
                },
            ),
        }),
        LoginAction::ActionRegister => {
            if state.kind == FormKind::Login {
                environment.navigate(Route::Signup);
            }
            None
        }
    }
}

/// Messages the form shows next to a field
pub fn field_messages(errors: &Errors, field: &str) -> Vec<String> {
    errors
        .for_field(field)
        .map(|e| e.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::repository::Repository;
    use crate::environment::types::{AppEvent, FieldError};
    use std::sync::Arc;

    fn environment() -> (Environment, flume::Receiver<AppEvent>) {
        Environment::new(
            url::Url::parse("http://some.api/").unwrap(),
            Arc::new(Repository::in_memory()),
        )
    }

    #[test]
    fn test_default_state() {
        let state = LoginState::default();
        assert_eq!(state.email, "");
        assert_eq!(state.password, "");
    }

    #[test]
    fn test_submit_login() {
        let (environment, _) = environment();
        let mut state = LoginState::new(FormKind::Login);
        reduce(LoginAction::EmailChanged("a@b.c".to_string()), &mut state, &environment);
        reduce(LoginAction::PasswordChanged("pw".to_string()), &mut state, &environment);
        let action = reduce(LoginAction::Submit, &mut state, &environment);
        assert_eq!(
            action,
            Some(login_request_action(
                Link::new(LOGIN_PATH),
                LoginInfo {
                    email: "a@b.c".to_string(),
                    password: "pw".to_string()
                }
            ))
        );
    }

    #[test]
    fn test_submit_signup() {
        let (environment, _) = environment();
        let mut state = LoginState::new(FormKind::Signup);
        let action = reduce(LoginAction::Submit, &mut state, &environment);
        assert_eq!(
            action,
            Some(signup_request_action(Link::new(SIGNUP_PATH), SignupInfo::default()))
        );
    }

    #[test]
    fn test_sign_up_link_navigates() {
        let (environment, events) = environment();
        let mut state = LoginState::new(FormKind::Login);
        assert_eq!(
            reduce(LoginAction::ActionRegister, &mut state, &environment),
            None
        );
        assert_eq!(events.try_recv(), Ok(AppEvent::Navigate(Route::Signup)));
    }

    #[test]
    fn test_field_messages() {
        let errors = Errors {
            field_errors: vec![FieldError {
                field: "email".to_string(),
                message: "is taken".to_string(),
            }],
            global_errors: vec![],
        };
        assert_eq!(field_messages(&errors, "email"), vec!["is taken".to_string()]);
        assert!(field_messages(&errors, "password").is_empty());
    }
}
