use crate::actions::Action;
use crate::environment::types::Links;

/// Discovered links accumulate; a newer link replaces one of the same name
pub fn reduce(state: Links, action: &Action) -> Links {
    match action {
        Action::StoreLinks { links } => links.clone().union(state),
        Action::LogoutRequest => Links::default(),
        _ => state,
    }
}
