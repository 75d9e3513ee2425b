//! Commands and results flowing through the store.
//!
//! The creator functions are total and side effect free. Links that are not
//! known yet are passed as `Link::default()` and never followed.

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::environment::types::{
    Errors, Link, Links, List, LoginInfo, RawCompletedTodo, SignupInfo, TodoForm,
};

#[derive(IntoStaticStr, EnumIter, Display, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    SignupRequestAction,
    LoginRequestAction,
    LogoutRequestAction,
    StoreSessionAction,

    StoreLinksAction,
    PersistLinkAction,

    LoadTodosViewAction,
    LoadHistoryViewAction,

    GetListRequestAction,
    StoreListAction,
    UnlockListRequestAction,

    GetCompletedListRequestAction,
    StoreCompletedListAction,

    StoreErrorsAction,
    DismissGlobalAlertAction,
    ClearErrorsAction,

    CreateTodoRequestAction,
    DeleteTodoRequestAction,
    DisplaceTodoRequestAction,
    UpdateTodoRequestAction,
    CompleteTodoRequestAction,
    MoveTodoRequestAction,
    PullTodosRequestAction,
    EscalateTodosRequestAction,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Action {
    SignupRequest {
        link: Link,
        signup_info: SignupInfo,
    },
    LoginRequest {
        link: Link,
        login_info: LoginInfo,
    },
    LogoutRequest,
    StoreSession {
        token: String,
    },

    StoreLinks {
        links: Links,
    },
    PersistLink {
        link: Link,
    },

    LoadTodosView,
    LoadHistoryView,

    GetListRequest {
        scheduling: String,
        link: Link,
    },
    StoreList {
        list: List,
        list_link: Link,
    },
    UnlockListRequest {
        link: Link,
    },

    GetCompletedListRequest {
        link: Link,
    },
    StoreCompletedList {
        todos: Vec<RawCompletedTodo>,
    },

    StoreErrors {
        errors: Errors,
    },
    DismissGlobalAlert {
        index: usize,
    },
    ClearErrors,

    CreateTodoRequest {
        link: Link,
        todo: TodoForm,
    },
    DeleteTodoRequest {
        link: Link,
    },
    DisplaceTodoRequest {
        link: Link,
        todo: TodoForm,
    },
    UpdateTodoRequest {
        link: Link,
        todo: TodoForm,
    },
    CompleteTodoRequest {
        link: Link,
    },
    MoveTodoRequest {
        link: Link,
    },
    PullTodosRequest {
        link: Link,
    },
    EscalateTodosRequest {
        link: Link,
    },
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::SignupRequest { .. } => ActionType::SignupRequestAction,
            Action::LoginRequest { .. } => ActionType::LoginRequestAction,
            Action::LogoutRequest => ActionType::LogoutRequestAction,
            Action::StoreSession { .. } => ActionType::StoreSessionAction,
            Action::StoreLinks { .. } => ActionType::StoreLinksAction,
            Action::PersistLink { .. } => ActionType::PersistLinkAction,
            Action::LoadTodosView => ActionType::LoadTodosViewAction,
            Action::LoadHistoryView => ActionType::LoadHistoryViewAction,
            Action::GetListRequest { .. } => ActionType::GetListRequestAction,
            Action::StoreList { .. } => ActionType::StoreListAction,
            Action::UnlockListRequest { .. } => ActionType::UnlockListRequestAction,
            Action::GetCompletedListRequest { .. } => ActionType::GetCompletedListRequestAction,
            Action::StoreCompletedList { .. } => ActionType::StoreCompletedListAction,
            Action::StoreErrors { .. } => ActionType::StoreErrorsAction,
            Action::DismissGlobalAlert { .. } => ActionType::DismissGlobalAlertAction,
            Action::ClearErrors => ActionType::ClearErrorsAction,
            Action::CreateTodoRequest { .. } => ActionType::CreateTodoRequestAction,
            Action::DeleteTodoRequest { .. } => ActionType::DeleteTodoRequestAction,
            Action::DisplaceTodoRequest { .. } => ActionType::DisplaceTodoRequestAction,
            Action::UpdateTodoRequest { .. } => ActionType::UpdateTodoRequestAction,
            Action::CompleteTodoRequest { .. } => ActionType::CompleteTodoRequestAction,
            Action::MoveTodoRequest { .. } => ActionType::MoveTodoRequestAction,
            Action::PullTodosRequest { .. } => ActionType::PullTodosRequestAction,
            Action::EscalateTodosRequest { .. } => ActionType::EscalateTodosRequestAction,
        }
    }

    /// The link a request action will follow, if it carries one
    pub fn link(&self) -> Option<&Link> {
        match self {
            Action::SignupRequest { link, .. }
            | Action::LoginRequest { link, .. }
            | Action::PersistLink { link }
            | Action::GetListRequest { link, .. }
            | Action::UnlockListRequest { link }
            | Action::GetCompletedListRequest { link }
            | Action::CreateTodoRequest { link, .. }
            | Action::DeleteTodoRequest { link }
            | Action::DisplaceTodoRequest { link, .. }
            | Action::UpdateTodoRequest { link, .. }
            | Action::CompleteTodoRequest { link }
            | Action::MoveTodoRequest { link }
            | Action::PullTodosRequest { link }
            | Action::EscalateTodosRequest { link } => Some(link),
            _ => None,
        }
    }
}

// Session

pub fn signup_request_action(link: Link, signup_info: SignupInfo) -> Action {
    Action::SignupRequest { link, signup_info }
}

pub fn login_request_action(link: Link, login_info: LoginInfo) -> Action {
    Action::LoginRequest { link, login_info }
}

pub fn logout_request_action() -> Action {
    Action::LogoutRequest
}

pub fn store_session_action(token: impl Into<String>) -> Action {
    Action::StoreSession {
        token: token.into(),
    }
}

// Links

pub fn store_links_action(links: Links) -> Action {
    Action::StoreLinks { links }
}

pub fn persist_link_action(link: Link) -> Action {
    Action::PersistLink { link }
}

// Views

pub fn load_todos_view_action() -> Action {
    Action::LoadTodosView
}

pub fn load_history_view_action() -> Action {
    Action::LoadHistoryView
}

// Lists

pub fn get_list_request_action(scheduling: impl Into<String>, link: Link) -> Action {
    Action::GetListRequest {
        scheduling: scheduling.into(),
        link,
    }
}

pub fn store_list_action(list: List, list_link: Link) -> Action {
    Action::StoreList { list, list_link }
}

pub fn unlock_list_request_action(link: Link) -> Action {
    Action::UnlockListRequest { link }
}

pub fn get_completed_list_request_action(link: Link) -> Action {
    Action::GetCompletedListRequest { link }
}

pub fn store_completed_list_action(todos: Vec<RawCompletedTodo>) -> Action {
    Action::StoreCompletedList { todos }
}

// Errors

pub fn store_errors_action(errors: Errors) -> Action {
    Action::StoreErrors { errors }
}

pub fn dismiss_global_alert_action(index: usize) -> Action {
    Action::DismissGlobalAlert { index }
}

pub fn clear_errors_action() -> Action {
    Action::ClearErrors
}

// Todos

pub fn create_todo_request_action(link: Link, todo: TodoForm) -> Action {
    Action::CreateTodoRequest { link, todo }
}

pub fn delete_todo_request_action(link: Link) -> Action {
    Action::DeleteTodoRequest { link }
}

pub fn displace_todo_request_action(link: Link, todo: TodoForm) -> Action {
    Action::DisplaceTodoRequest { link, todo }
}

pub fn update_todo_request_action(link: Link, todo: TodoForm) -> Action {
    Action::UpdateTodoRequest { link, todo }
}

pub fn complete_todo_request_action(link: Link) -> Action {
    Action::CompleteTodoRequest { link }
}

pub fn move_todo_request_action(link: Link) -> Action {
    Action::MoveTodoRequest { link }
}

pub fn pull_todos_request_action(link: Link) -> Action {
    Action::PullTodosRequest { link }
}

pub fn escalate_todos_request_action(link: Link) -> Action {
    Action::EscalateTodosRequest { link }
}
