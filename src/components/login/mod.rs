mod reducer;

pub use reducer::{field_messages, reduce, FormKind, LoginAction, LoginState};
