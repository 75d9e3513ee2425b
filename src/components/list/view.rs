use super::reducer::{Props, State};
use crate::environment::types::{Link, Todo};

/// What the tabs of the list show and allow
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TabView {
    pub key: String,
    pub title: String,
    pub disabled: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Confirmation {
    pub title: String,
    pub body: String,
}

/// Capitalises the first letter only
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `MM:SS` of a millisecond duration
pub fn format_duration(millis: u64) -> String {
    let seconds = millis / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn now_tab(state: &State, props: &Props) -> TabView {
    let list = &props.list_and_link.list;
    TabView {
        key: list.name.clone(),
        title: title_case(&list.name),
        disabled: false,
        active: state.active_tab == list.name,
    }
}

pub fn deferred_tab(state: &State, props: &Props) -> TabView {
    let list = &props.list_and_link.list;
    let title = if state.is_locked() {
        format!(
            "{} {}",
            title_case(&list.deferred_name),
            format_duration(state.unlock_duration)
        )
    } else {
        title_case(&list.deferred_name)
    };
    TabView {
        key: list.deferred_name.clone(),
        title,
        disabled: list.links.unlock.is_none() && !state.is_locked(),
        active: state.active_tab == list.deferred_name,
    }
}

pub fn unlock_confirmation(state: &State, props: &Props) -> Option<Confirmation> {
    if !state.show_unlock_confirmation {
        return None;
    }
    let name = &props.list_and_link.list.deferred_name;
    Some(Confirmation {
        title: format!("Unlock {name} list?"),
        body: format!("The {name} list can only be unlocked once a day."),
    })
}

/// The todos of the active tab
pub fn visible_todos<'a>(state: &State, props: &'a Props) -> &'a [Todo] {
    let list = &props.list_and_link.list;
    if state.active_tab == list.name {
        &list.todos
    } else {
        &list.deferred_todos
    }
}

pub fn displace_link<'a>(state: &State, props: &'a Props) -> Option<&'a Link> {
    if !state.submitting {
        return None;
    }
    props.list_and_link.list.links.displace.as_ref()
}

pub fn pull_link(props: &Props) -> Option<&Link> {
    props.list_and_link.list.links.pull.as_ref()
}

pub fn escalate_link(props: &Props) -> Option<&Link> {
    props.list_and_link.list.links.escalate.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::types::{List, ListAndLink};

    fn props(unlock_duration: u64) -> Props {
        Props {
            list_and_link: ListAndLink {
                list: List {
                    name: "name".to_string(),
                    deferred_name: "deferredname".to_string(),
                    unlock_duration,
                    ..Default::default()
                },
                list_link: Link::new("http://some.api/list"),
            },
            selected_list: "now".to_string(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1700000), "28:20");
        assert_eq!(format_duration(999), "00:00");
        assert_eq!(format_duration(61000), "01:01");
    }

    #[test]
    fn test_deferred_tab_title() {
        let props = props(1700000);
        let state = State::new(&props);
        let tab = deferred_tab(&state, &props);
        assert_eq!(tab.title, "Deferredname 28:20");
        assert!(!tab.disabled);

        let props = self::props(0);
        let state = State::new(&props);
        let tab = deferred_tab(&state, &props);
        assert_eq!(tab.title, "Deferredname");
        assert!(tab.disabled);
    }

    #[test]
    fn test_unlock_link_enables_deferred_tab() {
        let mut props = props(0);
        props.list_and_link.list.links.unlock = Some(Link::new("http://some.api/unlock"));
        let state = State::new(&props);
        assert!(!deferred_tab(&state, &props).disabled);
    }

    #[test]
    fn test_unlock_confirmation_copy() {
        let props = props(0);
        let mut state = State::new(&props);
        assert_eq!(unlock_confirmation(&state, &props), None);
        state.show_unlock_confirmation = true;
        let confirmation = unlock_confirmation(&state, &props).unwrap();
        assert_eq!(confirmation.title, "Unlock deferredname list?");
        assert_eq!(
            confirmation.body,
            "The deferredname list can only be unlocked once a day."
        );
    }

    #[test]
    fn test_displace_needs_link_and_submitting() {
        let mut props = props(0);
        let mut state = State::new(&props);
        assert!(displace_link(&state, &props).is_none());
        props.list_and_link.list.links.displace = Some(Link::new("displaceHref"));
        assert!(displace_link(&state, &props).is_none());
        state.submitting = true;
        assert_eq!(displace_link(&state, &props), Some(&Link::new("displaceHref")));
    }

    #[test]
    fn test_pull_and_escalate_need_links() {
        let mut props = props(0);
        assert!(pull_link(&props).is_none());
        assert!(escalate_link(&props).is_none());
        props.list_and_link.list.links.pull = Some(Link::new("pullHref"));
        props.list_and_link.list.links.escalate = Some(Link::new("escalateHref"));
        assert_eq!(pull_link(&props), Some(&Link::new("pullHref")));
        assert_eq!(escalate_link(&props), Some(&Link::new("escalateHref")));
    }

    #[test]
    fn test_now_tab() {
        let props = props(0);
        let state = State::new(&props);
        let tab = now_tab(&state, &props);
        assert_eq!(tab.title, "Name");
        assert!(tab.active);
    }
}
