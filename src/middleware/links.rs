use crate::actions::Action;
use crate::effect::{Dispatcher, Effect};
use crate::environment::repository::LINK_KEY;
use crate::environment::Environment;
use crate::store::State;

pub fn middleware(
    action: &Action,
    _state: &State,
    environment: &Environment,
    _dispatcher: &Dispatcher,
) -> Effect {
    if let Action::PersistLink { link } = action {
        if let Err(e) = environment.repository.set(LINK_KEY, &link.href) {
            log::error!("Could not persist link: {e}");
        }
    }
    Effect::NONE
}
