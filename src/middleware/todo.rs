use serde::de::DeserializeOwned;

use crate::actions::{
    clear_errors_action, store_completed_list_action, store_errors_action, store_links_action,
    store_list_action, Action,
};
use crate::effect::{Dispatcher, Effect};
use crate::environment::model::{ApiError, Model, Response};
use crate::environment::types::{CompletedListResponse, Link, ListResponse, TodoForm};
use crate::environment::Environment;
use crate::store::State;

/// How a command reaches the server
#[derive(Debug, Clone)]
enum Call {
    Get,
    Post(Option<TodoForm>),
    Put(TodoForm),
    Delete,
}

impl Call {
    async fn send<T: DeserializeOwned>(
        &self,
        model: &Model,
        link: &Link,
    ) -> Result<Response<T>, ApiError> {
        match self {
            Call::Get => model.get(link).await,
            Call::Post(todo) => model.post(link, todo.as_ref()).await,
            Call::Put(todo) => model.put(link, todo).await,
            Call::Delete => model.delete(link).await,
        }
    }
}

/// Every list mutation is "follow the link, then store the list the
/// server answers with". An empty link is never followed.
pub fn middleware(
    action: &Action,
    _state: &State,
    environment: &Environment,
    dispatcher: &Dispatcher,
) -> Effect {
    let Some(link) = action.link() else {
        return Effect::NONE;
    };
    let call = match action {
        Action::CreateTodoRequest { todo, .. } | Action::DisplaceTodoRequest { todo, .. } => {
            Call::Post(Some(todo.clone()))
        }
        Action::UpdateTodoRequest { todo, .. } => Call::Put(todo.clone()),
        Action::DeleteTodoRequest { .. } => Call::Delete,
        Action::MoveTodoRequest { .. }
        | Action::CompleteTodoRequest { .. }
        | Action::PullTodosRequest { .. }
        | Action::EscalateTodosRequest { .. }
        | Action::UnlockListRequest { .. } => Call::Post(None),
        Action::GetListRequest { .. } | Action::GetCompletedListRequest { .. } => Call::Get,
        _ => return Effect::NONE,
    };
    let clears_errors = matches!(call, Call::Post(Some(_)) | Call::Put(_));
    let command = if link.is_empty() {
        log::debug!("no link for {}, nothing to do", action.action_type());
        Effect::NONE
    } else if let Action::GetCompletedListRequest { .. } = action {
        completed_list_request(link.clone(), environment, dispatcher)
    } else {
        list_command(link.clone(), call, environment, dispatcher)
    };
    if clears_errors {
        Effect::merge2(Effect::action(clear_errors_action()), command)
    } else {
        command
    }
}

fn list_command(
    link: Link,
    call: Call,
    environment: &Environment,
    dispatcher: &Dispatcher,
) -> Effect {
    let model = environment.model.clone();
    let dispatcher = dispatcher.clone();
    Effect::task(async move {
        match call.send::<ListResponse>(&model, &link).await {
            Ok(Response::Success(response)) => {
                dispatcher.put(store_list_action(response.list, response.links.list))
            }
            Ok(Response::Invalid(errors)) => dispatcher.put(store_errors_action(errors)),
            Err(e) => log::error!("{call:?} {} dropped: {e}", link.href),
        }
    })
}

fn completed_list_request(link: Link, environment: &Environment, dispatcher: &Dispatcher) -> Effect {
    let model = environment.model.clone();
    let dispatcher = dispatcher.clone();
    Effect::task(async move {
        match model.get::<CompletedListResponse>(&link).await {
            Ok(Response::Success(response)) => {
                dispatcher.put(store_completed_list_action(response.todos));
                dispatcher.put(store_links_action(response.links));
            }
            Ok(Response::Invalid(errors)) => dispatcher.put(store_errors_action(errors)),
            Err(e) => log::error!("GET {} dropped: {e}", link.href),
        }
    })
}
