mod links;
pub mod load_view;
mod session;
mod todo;

use crate::actions::Action;
use crate::effect::{Dispatcher, Effect};
use crate::environment::Environment;
use crate::store::State;

/// Sees every action before it is reduced. Side effects are either done
/// right away (storage, navigation) or described by the returned `Effect`.
pub type Middleware = fn(&Action, &State, &Environment, &Dispatcher) -> Effect;

pub fn all() -> Vec<Middleware> {
    vec![
        session::middleware,
        links::middleware,
        load_view::middleware,
        todo::middleware,
    ]
}
