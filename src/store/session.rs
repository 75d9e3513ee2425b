use crate::actions::Action;
use crate::environment::types::Session;

pub fn reduce(state: Session, action: &Action) -> Session {
    match action {
        Action::StoreSession { token } => Session {
            token: Some(token.clone()),
        },
        Action::LogoutRequest => Session::default(),
        _ => state,
    }
}
