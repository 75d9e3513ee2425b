use crate::actions::{
    clear_errors_action, get_list_request_action, persist_link_action, store_errors_action,
    store_session_action, Action,
};
use crate::effect::{Dispatcher, Effect};
use crate::environment::model::Response;
use crate::environment::repository::{LINK_KEY, SESSION_TOKEN_KEY};
use crate::environment::types::{Link, Route, SessionResponse, NOW};
use crate::environment::Environment;
use crate::store::State;

pub fn middleware(
    action: &Action,
    state: &State,
    environment: &Environment,
    dispatcher: &Dispatcher,
) -> Effect {
    match action {
        Action::SignupRequest { link, signup_info } => {
            let body = serde_json::to_value(signup_info);
            start_session(link.clone(), body, environment, dispatcher)
        }
        Action::LoginRequest { link, login_info } => {
            let body = serde_json::to_value(login_info);
            start_session(link.clone(), body, environment, dispatcher)
        }
        Action::LogoutRequest => {
            for key in [SESSION_TOKEN_KEY, LINK_KEY] {
                if let Err(e) = environment.repository.remove(key) {
                    log::error!("Could not remove {key}: {e}");
                }
            }
            environment.navigate(Route::Login);
            Effect::NONE
        }
        Action::StoreSession { token } => {
            if let Err(e) = environment.repository.set(SESSION_TOKEN_KEY, token) {
                log::error!("Could not persist session: {e}");
            }
            let link = state.links.get("list").cloned().unwrap_or_default();
            let effect = Effect::action(get_list_request_action(NOW, link));
            environment.navigate(Route::Root);
            effect
        }
        _ => Effect::NONE,
    }
}

fn start_session(
    link: Link,
    body: serde_json::Result<serde_json::Value>,
    environment: &Environment,
    dispatcher: &Dispatcher,
) -> Effect {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::error!("Could not encode credentials: {e}");
            return Effect::NONE;
        }
    };
    let model = environment.model.clone();
    let environment = environment.clone();
    let dispatcher = dispatcher.clone();
    Effect::merge2(
        Effect::action(clear_errors_action()),
        Effect::task(async move {
            match model.post::<_, SessionResponse>(&link, Some(&body)).await {
                Ok(Response::Success(response)) => {
                    dispatcher.put(store_session_action(response.session.token));
                    dispatcher.put(persist_link_action(response.links.root));
                    environment.navigate(Route::Root);
                }
                Ok(Response::Invalid(errors)) => dispatcher.put(store_errors_action(errors)),
                Err(e) => log::error!("session request to {} dropped: {e}", link.href),
            }
        }),
    )
}
