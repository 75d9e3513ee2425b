use futures_util::future::BoxFuture;
use std::future::Future;

use crate::actions::Action;

/// Lets running sequences put actions back into the store
#[derive(Clone, Debug)]
pub struct Dispatcher {
    sender: flume::Sender<Action>,
}

impl Dispatcher {
    pub fn new() -> (Self, flume::Receiver<Action>) {
        let (sender, receiver) = flume::unbounded();
        (Self { sender }, receiver)
    }

    pub fn put(&self, action: Action) {
        log::trace!("put {}", action.action_type());
        if self.sender.send(action).is_err() {
            log::debug!("store is gone, dropping action");
        }
    }
}

/// What a middleware wants to happen after it saw an action
pub enum Effect {
    /// Dispatched synchronously, before the triggering action is reduced
    Action(Action),
    /// Spawned on the runtime. Puts its results through a `Dispatcher`.
    Task(BoxFuture<'static, ()>),
    Multiple(Vec<Effect>),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action(arg0) => f.debug_tuple("Action").field(arg0).finish(),
            Self::Task(_) => write!(f, "Task"),
            Self::Multiple(arg0) => f.debug_tuple("Multiple").field(arg0).finish(),
        }
    }
}

impl Effect {
    pub const NONE: Effect = Effect::Multiple(Vec::new());

    pub fn action(action: Action) -> Self {
        Effect::Action(action)
    }

    pub fn task(future: impl Future<Output = ()> + Send + 'static) -> Self {
        Effect::Task(Box::pin(future))
    }

    pub fn merge2(first: Effect, second: Effect) -> Self {
        Effect::Multiple(vec![first, second])
    }

    pub fn merge(effects: impl IntoIterator<Item = Effect>) -> Self {
        Effect::Multiple(effects.into_iter().collect())
    }

    pub fn is_none(&self) -> bool {
        match self {
            Effect::Multiple(effects) => effects.iter().all(Effect::is_none),
            _ => false,
        }
    }

    /// Flattens into the actions to dispatch now and the tasks to spawn
    pub fn unpack(self) -> (Vec<Action>, Vec<BoxFuture<'static, ()>>) {
        let mut actions = Vec::new();
        let mut tasks = Vec::new();
        self.unpack_into(&mut actions, &mut tasks);
        (actions, tasks)
    }

    fn unpack_into(self, actions: &mut Vec<Action>, tasks: &mut Vec<BoxFuture<'static, ()>>) {
        match self {
            Effect::Action(action) => actions.push(action),
            Effect::Task(task) => tasks.push(task),
            Effect::Multiple(effects) => {
                for effect in effects {
                    effect.unpack_into(actions, tasks);
                }
            }
        }
    }
}
