use crate::actions::Action;
use crate::environment::types::{ListAndLink, NOW};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListState {
    /// Scheduling of the most recently requested list
    pub selected_list: String,
    pub list_and_link: Option<ListAndLink>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            selected_list: NOW.to_string(),
            list_and_link: None,
        }
    }
}

pub fn reduce(state: ListState, action: &Action) -> ListState {
    match action {
        Action::GetListRequest { scheduling, .. } if !scheduling.is_empty() => ListState {
            selected_list: scheduling.clone(),
            ..state
        },
        Action::StoreList { list, list_link } => ListState {
            list_and_link: Some(ListAndLink {
                list: list.clone(),
                list_link: list_link.clone(),
            }),
            ..state
        },
        Action::LogoutRequest => ListState::default(),
        _ => state,
    }
}
