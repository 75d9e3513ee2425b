use crate::actions::Action;
use crate::environment::types::{CompletedList, CompletedTodo};

/// Completion timestamps are parsed here and nowhere else
pub fn reduce(state: CompletedList, action: &Action) -> CompletedList {
    match action {
        Action::StoreCompletedList { todos } => CompletedList {
            todos: todos.iter().map(CompletedTodo::from).collect(),
        },
        Action::LogoutRequest => CompletedList::default(),
        _ => state,
    }
}
