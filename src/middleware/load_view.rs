use crate::actions::{
    get_completed_list_request_action, get_list_request_action, store_links_action, Action,
};
use crate::effect::{Dispatcher, Effect};
use crate::environment::model::{Model, Response};
use crate::environment::types::{Link, Links, ResourcesResponse, NOW};
use crate::environment::Environment;
use crate::store::State;

/// The links followed to bootstrap one view. Each step is only known
/// from the response of the step before.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ViewPath {
    pub resources: &'static str,
    pub target: &'static str,
}

pub const TODOS_VIEW: ViewPath = ViewPath {
    resources: "todoResources",
    target: "list",
};

pub const HISTORY_VIEW: ViewPath = ViewPath {
    resources: "historyResources",
    target: "completedTodos",
};

pub fn middleware(
    action: &Action,
    _state: &State,
    environment: &Environment,
    dispatcher: &Dispatcher,
) -> Effect {
    let (path, terminal): (ViewPath, fn(Link) -> Action) = match action {
        Action::LoadTodosView => (TODOS_VIEW, |link| get_list_request_action(NOW, link)),
        Action::LoadHistoryView => (HISTORY_VIEW, get_completed_list_request_action),
        _ => return Effect::NONE,
    };
    let Some(root) = environment.root_link() else {
        log::debug!("no root link persisted, cannot load {}", path.resources);
        return Effect::NONE;
    };
    let model = environment.model.clone();
    let dispatcher = dispatcher.clone();
    Effect::task(async move {
        if let Some(link) = load_view(&model, &dispatcher, root, path).await {
            dispatcher.put(terminal(link));
        }
    })
}

/// Walks root -> resources -> target. Returns `None` as soon as a
/// request fails or an expected link is missing.
pub async fn load_view(
    model: &Model,
    dispatcher: &Dispatcher,
    root: Link,
    path: ViewPath,
) -> Option<Link> {
    let links = fetch_links(model, dispatcher, &root).await?;
    let resources = links.get(path.resources).cloned()?;
    let links = fetch_links(model, dispatcher, &resources).await?;
    links.get(path.target).cloned()
}

async fn fetch_links(model: &Model, dispatcher: &Dispatcher, link: &Link) -> Option<Links> {
    log::debug!("load view step {}", link.href);
    match model.get::<ResourcesResponse>(link).await {
        Ok(Response::Success(response)) => {
            dispatcher.put(store_links_action(response.links.clone()));
            Some(response.links)
        }
        Ok(Response::Invalid(errors)) => {
            log::debug!("load view step {} rejected: {errors:?}", link.href);
            None
        }
        Err(e) => {
            log::error!("GET {} dropped: {e}", link.href);
            None
        }
    }
}
