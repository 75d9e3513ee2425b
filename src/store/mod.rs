pub mod completed;
pub mod errors;
pub mod links;
pub mod list;
pub mod load_view;
pub mod session;

use tokio::task::JoinSet;

use crate::actions::Action;
use crate::effect::{Dispatcher, Effect};
use crate::environment::types::{CompletedList, Errors, Links, Session};
use crate::environment::Environment;
use crate::middleware::{self, Middleware};

pub use list::ListState;
pub use load_view::LoadViewState;

/// The single state tree. Only `reduce` produces new versions of it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub list: ListState,
    pub completed_list: CompletedList,
    pub links: Links,
    pub session: Session,
    pub errors: Errors,
    pub load_view: LoadViewState,
}

/// Reduces every slice independently. Unknown actions leave a slice as is.
pub fn reduce(state: State, action: &Action) -> State {
    log::trace!("reduce {}", action.action_type());
    State {
        list: list::reduce(state.list, action),
        completed_list: completed::reduce(state.completed_list, action),
        links: links::reduce(state.links, action),
        session: session::reduce(state.session, action),
        errors: errors::reduce(state.errors, action),
        load_view: load_view::reduce(state.load_view, action),
    }
}

pub type Subscriber = Box<dyn FnMut(&Action, &State) + Send>;

/// Owns the state tree. Every action passes the middleware chain first and
/// is reduced afterwards; actions put by running tasks are queued and
/// dispatched in arrival order.
pub struct Store {
    state: State,
    environment: Environment,
    middleware: Vec<Middleware>,
    dispatcher: Dispatcher,
    receiver: flume::Receiver<Action>,
    tasks: JoinSet<()>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Store {
    pub fn new(environment: Environment) -> Self {
        Self::with_state(environment, State::default())
    }

    pub fn with_state(environment: Environment, state: State) -> Self {
        let (dispatcher, receiver) = Dispatcher::new();
        Self {
            state,
            environment,
            middleware: middleware::all(),
            dispatcher,
            receiver,
            tasks: JoinSet::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Called with every dispatched action and the state after reducing it
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Action, &State) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Has to be called from within a tokio runtime, as tasks are spawned
    pub fn dispatch(&mut self, action: Action) {
        log::trace!("{action:?}");
        let mut effects = Vec::with_capacity(self.middleware.len());
        for middleware in &self.middleware {
            effects.push(middleware(
                &action,
                &self.state,
                &self.environment,
                &self.dispatcher,
            ));
        }
        let (actions, tasks) = Effect::merge(effects).unpack();

        // middleware dispatches happen before the action reaches the reducer
        for action in actions {
            self.dispatch(action);
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&action, &self.state);
        }

        for task in tasks {
            self.tasks.spawn(task);
        }
    }

    /// Dispatches everything that was put so far without waiting
    pub fn drain(&mut self) {
        while let Ok(action) = self.receiver.try_recv() {
            self.dispatch(action);
        }
    }

    /// Runs until no task is pending and nothing is left to dispatch
    pub async fn settle(&mut self) {
        loop {
            self.drain();
            if self.tasks.is_empty() {
                break;
            }
            tokio::select! {
                Ok(action) = self.receiver.recv_async() => self.dispatch(action),
                Some(joined) = self.tasks.join_next() => {
                    if let Err(e) = joined {
                        log::error!("Task failed: {e:?}");
                    }
                }
                else => break,
            }
        }
    }
}
