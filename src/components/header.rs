use crate::actions::{logout_request_action, Action};
use crate::environment::Environment;

pub const BRAND: &str = "Doer";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuItem {
    Logout,
}

/// The menu only exists while a session token is persisted
pub fn menu(environment: &Environment) -> Vec<MenuItem> {
    match environment.session_token() {
        Some(_) => vec![MenuItem::Logout],
        None => Vec::new(),
    }
}

pub fn select(item: MenuItem) -> Action {
    match item {
        MenuItem::Logout => logout_request_action(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::repository::{Repository, SESSION_TOKEN_KEY};
    use crate::environment::Persistence;
    use std::sync::Arc;

    #[test]
    fn test_logout_only_with_session() {
        let repository = Arc::new(Repository::in_memory());
        let (environment, _) = Environment::new(
            url::Url::parse("http://some.api/").unwrap(),
            repository.clone(),
        );
        assert!(menu(&environment).is_empty());
        repository.set(SESSION_TOKEN_KEY, "socooltoken").unwrap();
        assert_eq!(menu(&environment), vec![MenuItem::Logout]);
        assert_eq!(select(MenuItem::Logout), Action::LogoutRequest);
    }
}
