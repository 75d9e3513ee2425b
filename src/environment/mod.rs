pub mod model;
pub mod repository;
pub mod types;

pub use model::Model;
pub use repository::{Persistence, Repository};

use std::sync::Arc;

use flume::{Receiver, Sender};
use url::Url;

use self::repository::{LINK_KEY, SESSION_TOKEN_KEY};
use self::types::{AppEvent, Link, Route};

/// Everything the middleware needs from the outside world
#[derive(Clone)]
pub struct Environment {
    pub model: Model,
    pub repository: Arc<dyn Persistence>,
    events: Sender<AppEvent>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish()
    }
}

impl Environment {
    /// Returns the environment and the receiving end of its app events
    pub fn new(url: Url, repository: Arc<dyn Persistence>) -> (Self, Receiver<AppEvent>) {
        let (events, receiver) = flume::unbounded();
        let model = Model::new(url, repository.clone());
        (
            Self {
                model,
                repository,
                events,
            },
            receiver,
        )
    }

    pub fn navigate(&self, route: Route) {
        log::debug!("navigate to {route}");
        if self.events.send(AppEvent::Navigate(route)).is_err() {
            log::debug!("nobody listens for navigation, dropping {route}");
        }
    }

    pub fn session_token(&self) -> Option<String> {
        self.repository.get(SESSION_TOKEN_KEY)
    }

    pub fn root_link(&self) -> Option<Link> {
        self.repository.get(LINK_KEY).map(Link::new)
    }
}
