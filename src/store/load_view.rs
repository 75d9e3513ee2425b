use crate::actions::Action;

#[derive(Default, Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoadViewState {
    pub todos_view_loaded: bool,
    pub history_view_loaded: bool,
}

/// A view counts as loaded once its terminal store action arrived
pub fn reduce(state: LoadViewState, action: &Action) -> LoadViewState {
    match action {
        Action::LoadTodosView => LoadViewState {
            todos_view_loaded: false,
            ..state
        },
        Action::LoadHistoryView => LoadViewState {
            history_view_loaded: false,
            ..state
        },
        Action::StoreList { .. } => LoadViewState {
            todos_view_loaded: true,
            ..state
        },
        Action::StoreCompletedList { .. } => LoadViewState {
            history_view_loaded: true,
            ..state
        },
        Action::LogoutRequest => LoadViewState::default(),
        _ => state,
    }
}
