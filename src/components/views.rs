use crate::actions::{load_history_view_action, load_todos_view_action, Action};
use crate::effect::Dispatcher;
use crate::environment::types::Route;
use crate::environment::Environment;
use crate::store::State;

/// The protected views. Both bootstrap their data when mounted and show
/// a loader until it arrived.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum View {
    Todos,
    History,
}

impl View {
    fn load_action(&self) -> Action {
        match self {
            View::Todos => load_todos_view_action(),
            View::History => load_history_view_action(),
        }
    }

    /// Without a session this redirects to the login and returns false
    pub fn mount(&self, environment: &Environment, dispatcher: &Dispatcher) -> bool {
        if environment.session_token().is_none() {
            environment.navigate(Route::Login);
            return false;
        }
        dispatcher.put(self.load_action());
        true
    }

    pub fn is_loaded(&self, state: &State) -> bool {
        match self {
            View::Todos => state.load_view.todos_view_loaded,
            View::History => state.load_view.history_view_loaded,
        }
    }
}
