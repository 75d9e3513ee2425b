use crate::actions::{
    complete_todo_request_action, create_todo_request_action, delete_todo_request_action,
    displace_todo_request_action, escalate_todos_request_action, get_list_request_action,
    move_todo_request_action, pull_todos_request_action, unlock_list_request_action,
    update_todo_request_action, Action,
};
use crate::environment::types::{Link, ListAndLink, Todo, TodoForm};

/// One countdown step
pub const TICK_MILLIS: u64 = 1000;

/// What the list view gets from the store
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Props {
    pub list_and_link: ListAndLink,
    pub selected_list: String,
}

/// Local ui state. Never written back into the store.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct State {
    pub todo: TodoForm,
    pub submitting: bool,
    pub show_unlock_confirmation: bool,
    pub active_tab: String,
    pub unlock_duration: u64,
}

impl State {
    pub fn new(props: &Props) -> Self {
        Self {
            todo: TodoForm::default(),
            submitting: false,
            show_unlock_confirmation: false,
            active_tab: props.list_and_link.list.name.clone(),
            unlock_duration: props.list_and_link.list.unlock_duration,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.unlock_duration > 0
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ListAction {
    /// One second of the countdown elapsed
    Tick,
    VisibilityChanged {
        hidden: bool,
    },
    /// New data arrived from upstream
    Received(Props),
    SelectTab(String),
    ConfirmUnlock,
    DismissUnlock,
    TaskChanged(String),
    Submit,
    CreateTodo,
    CreateDeferredTodo,
    DisplaceTodo,
    Pull,
    Escalate,
    CompleteTodo(usize),
    DeleteTodo(usize),
    UpdateTodo(usize, String),
    /// Index of the todo and index of the move target
    MoveTodo(usize, usize),
}

/// The displayed duration only goes down, unless the countdown already
/// finished. A slowly polling parent never resets it upwards.
pub fn adopt_duration(current: u64, incoming: u64) -> u64 {
    if incoming < current || current == 0 {
        incoming
    } else {
        current
    }
}

/// Remaining duration after `elapsed` milliseconds of whole ticks
pub fn remaining(duration: u64, elapsed: u64) -> u64 {
    duration.saturating_sub(elapsed / TICK_MILLIS * TICK_MILLIS)
}

/// Applies `action` and returns the commands to dispatch
pub fn reduce(action: ListAction, state: &mut State, props: &mut Props) -> Vec<Action> {
    log::trace!("{action:?}");
    let list = &props.list_and_link.list;
    match action {
        ListAction::Tick => {
            if state.unlock_duration == 0 {
                return Vec::new();
            }
            state.unlock_duration = remaining(state.unlock_duration, TICK_MILLIS);
            if state.unlock_duration > 0 {
                return Vec::new();
            }
            if state.active_tab != list.deferred_name {
                state.active_tab = list.deferred_name.clone();
            }
            vec![refresh(props)]
        }
        ListAction::VisibilityChanged { hidden: true } => Vec::new(),
        ListAction::VisibilityChanged { hidden: false } => vec![refresh(props)],
        ListAction::Received(new_props) => {
            state.unlock_duration = adopt_duration(
                state.unlock_duration,
                new_props.list_and_link.list.unlock_duration,
            );
            *props = new_props;
            Vec::new()
        }
        ListAction::SelectTab(tab) => {
            if tab == list.name || !state.is_locked() {
                state.active_tab = tab;
            } else {
                state.show_unlock_confirmation = true;
            }
            Vec::new()
        }
        ListAction::ConfirmUnlock => {
            state.show_unlock_confirmation = false;
            list.links
                .unlock
                .clone()
                .map(unlock_list_request_action)
                .into_iter()
                .collect()
        }
        ListAction::DismissUnlock => {
            state.show_unlock_confirmation = false;
            Vec::new()
        }
        ListAction::TaskChanged(task) => {
            state.todo.task = task;
            Vec::new()
        }
        ListAction::Submit => {
            state.submitting = true;
            Vec::new()
        }
        ListAction::CreateTodo => submit(state, list.links.create.clone(), create_todo_request_action),
        ListAction::CreateDeferredTodo => submit(
            state,
            list.links.create_deferred.clone(),
            create_todo_request_action,
        ),
        ListAction::DisplaceTodo => submit(
            state,
            list.links.displace.clone(),
            displace_todo_request_action,
        ),
        ListAction::Pull => list
            .links
            .pull
            .clone()
            .map(pull_todos_request_action)
            .into_iter()
            .collect(),
        ListAction::Escalate => list
            .links
            .escalate
            .clone()
            .map(escalate_todos_request_action)
            .into_iter()
            .collect(),
        ListAction::CompleteTodo(index) => active_todo(state, props, index)
            .and_then(|todo| todo.links.complete.clone())
            .map(complete_todo_request_action)
            .into_iter()
            .collect(),
        ListAction::DeleteTodo(index) => active_todo(state, props, index)
            .and_then(|todo| todo.links.delete.clone())
            .map(delete_todo_request_action)
            .into_iter()
            .collect(),
        ListAction::UpdateTodo(index, task) => active_todo(state, props, index)
            .and_then(|todo| todo.links.update.clone())
            .map(|link| update_todo_request_action(link, TodoForm::new(task)))
            .into_iter()
            .collect(),
        ListAction::MoveTodo(index, target) => active_todo(state, props, index)
            .and_then(|todo| todo.links.moves.get(target).cloned())
            .map(move_todo_request_action)
            .into_iter()
            .collect(),
    }
}

fn refresh(props: &Props) -> Action {
    get_list_request_action(
        props.selected_list.clone(),
        props.list_and_link.list_link.clone(),
    )
}

/// The input is reset whether or not there was a link to submit to
fn submit(
    state: &mut State,
    link: Option<Link>,
    make: fn(Link, TodoForm) -> Action,
) -> Vec<Action> {
    let todo = std::mem::take(&mut state.todo);
    state.submitting = false;
    link.map(|link| make(link, todo)).into_iter().collect()
}

/// Todos on the deferred tab can't be acted upon while it is locked
fn active_todo<'a>(state: &State, props: &'a Props, index: usize) -> Option<&'a Todo> {
    let list = &props.list_and_link.list;
    if state.active_tab == list.name {
        list.todos.get(index)
    } else if !state.is_locked() {
        list.deferred_todos.get(index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::types::{List, ListLinks, TodoLinks};

    fn props() -> Props {
        Props {
            list_and_link: ListAndLink {
                list: List {
                    name: "name".to_string(),
                    deferred_name: "deferredname".to_string(),
                    unlock_duration: 1700900,
                    todos: vec![Todo {
                        task: "first".to_string(),
                        links: TodoLinks {
                            complete: Some(Link::new("completeHref")),
                            moves: vec![Link::new("moveHref")],
                            ..Default::default()
                        },
                    }],
                    deferred_todos: vec![Todo {
                        task: "later".to_string(),
                        links: TodoLinks {
                            delete: Some(Link::new("deleteLaterHref")),
                            ..Default::default()
                        },
                    }],
                    links: ListLinks {
                        create: Some(Link::new("http://some.api/todoNow")),
                        create_deferred: Some(Link::new("http://some.api/todoLater")),
                        completed: Some(Link::new("")),
                        ..Default::default()
                    },
                },
                list_link: Link::new("http://some.api/list"),
            },
            selected_list: "someSelectedList".to_string(),
        }
    }

    fn setup() -> (State, Props) {
        let props = props();
        (State::new(&props), props)
    }

    #[test]
    fn test_default_state() {
        let (state, _) = setup();
        assert_eq!(state.todo, TodoForm::new(""));
        assert!(!state.submitting);
        assert!(!state.show_unlock_confirmation);
        assert_eq!(state.active_tab, "name");
        assert_eq!(state.unlock_duration, 1700900);
    }

    #[test]
    fn test_tick_decrements_one_second() {
        let (mut state, mut props) = setup();
        let commands = reduce(ListAction::Tick, &mut state, &mut props);
        assert!(commands.is_empty());
        assert_eq!(state.unlock_duration, 1699900);
    }

    #[test]
    fn test_tick_never_goes_below_zero() {
        let (mut state, mut props) = setup();
        state.unlock_duration = 500;
        reduce(ListAction::Tick, &mut state, &mut props);
        assert_eq!(state.unlock_duration, 0);
        let commands = reduce(ListAction::Tick, &mut state, &mut props);
        assert_eq!(state.unlock_duration, 0);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_reaching_zero_switches_to_deferred_and_refreshes() {
        let (mut state, mut props) = setup();
        state.unlock_duration = TICK_MILLIS;
        let commands = reduce(ListAction::Tick, &mut state, &mut props);
        assert_eq!(state.active_tab, "deferredname");
        assert_eq!(
            commands,
            vec![get_list_request_action(
                "someSelectedList",
                Link::new("http://some.api/list")
            )]
        );
    }

    #[test]
    fn test_remaining() {
        assert_eq!(remaining(1700900, 1000), 1699900);
        assert_eq!(remaining(1700900, 999), 1700900);
        assert_eq!(remaining(1700900, 3_000_000), 0);
        for elapsed in [0, 1, 999, 1000, 1001, 123_456, 1_700_900, 9_999_999] {
            let expected = 1_700_900i64 - (elapsed as i64 / 1000) * 1000;
            assert_eq!(remaining(1700900, elapsed) as i64, expected.max(0));
        }
    }

    #[test]
    fn test_adopt_duration() {
        assert_eq!(adopt_duration(1700900, 1800000), 1700900);
        assert_eq!(adopt_duration(1700900, 15250), 15250);
        assert_eq!(adopt_duration(0, 15250), 15250);
        assert_eq!(adopt_duration(0, 0), 0);
    }

    #[test]
    fn test_received_props_follow_adoption_rule() {
        let (mut state, mut props) = setup();
        let mut larger = props.clone();
        larger.list_and_link.list.unlock_duration = 1800000;
        reduce(ListAction::Received(larger), &mut state, &mut props);
        assert_eq!(state.unlock_duration, 1700900);
        assert_eq!(props.list_and_link.list.unlock_duration, 1800000);

        let mut smaller = props.clone();
        smaller.list_and_link.list.unlock_duration = 15250;
        reduce(ListAction::Received(smaller), &mut state, &mut props);
        assert_eq!(state.unlock_duration, 15250);
        reduce(ListAction::Tick, &mut state, &mut props);
        assert_eq!(state.unlock_duration, 14250);
    }

    #[test]
    fn test_hidden_document_changes_nothing() {
        let (mut state, mut props) = setup();
        let before = state.clone();
        let commands = reduce(
            ListAction::VisibilityChanged { hidden: true },
            &mut state,
            &mut props,
        );
        assert!(commands.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_visible_document_refreshes() {
        let (mut state, mut props) = setup();
        let commands = reduce(
            ListAction::VisibilityChanged { hidden: false },
            &mut state,
            &mut props,
        );
        assert_eq!(
            commands,
            vec![get_list_request_action(
                "someSelectedList",
                Link::new("http://some.api/list")
            )]
        );
    }

    #[test]
    fn test_now_tab_is_always_selectable() {
        let (mut state, mut props) = setup();
        state.active_tab = "somethingElse".to_string();
        reduce(ListAction::SelectTab("name".to_string()), &mut state, &mut props);
        assert_eq!(state.active_tab, "name");
        assert!(!state.show_unlock_confirmation);
    }

    #[test]
    fn test_locked_deferred_tab_asks_for_confirmation() {
        let (mut state, mut props) = setup();
        reduce(
            ListAction::SelectTab("deferredname".to_string()),
            &mut state,
            &mut props,
        );
        assert_eq!(state.active_tab, "name");
        assert!(state.show_unlock_confirmation);
    }

    #[test]
    fn test_unlocked_deferred_tab_switches() {
        let (mut state, mut props) = setup();
        state.unlock_duration = 0;
        reduce(
            ListAction::SelectTab("deferredname".to_string()),
            &mut state,
            &mut props,
        );
        assert_eq!(state.active_tab, "deferredname");
        assert!(!state.show_unlock_confirmation);
    }

    #[test]
    fn test_confirm_unlock() {
        let (mut state, mut props) = setup();
        state.show_unlock_confirmation = true;
        let commands = reduce(ListAction::ConfirmUnlock, &mut state, &mut props);
        assert!(commands.is_empty());
        assert!(!state.show_unlock_confirmation);

        props.list_and_link.list.links.unlock = Some(Link::new("http://some.api/unlock"));
        state.show_unlock_confirmation = true;
        let commands = reduce(ListAction::ConfirmUnlock, &mut state, &mut props);
        assert_eq!(
            commands,
            vec![unlock_list_request_action(Link::new("http://some.api/unlock"))]
        );
        assert!(!state.show_unlock_confirmation);
    }

    #[test]
    fn test_dismiss_unlock() {
        let (mut state, mut props) = setup();
        state.show_unlock_confirmation = true;
        let commands = reduce(ListAction::DismissUnlock, &mut state, &mut props);
        assert!(commands.is_empty());
        assert!(!state.show_unlock_confirmation);
    }

    #[test]
    fn test_create_clears_input() {
        let (mut state, mut props) = setup();
        reduce(ListAction::TaskChanged("someTask".to_string()), &mut state, &mut props);
        reduce(ListAction::Submit, &mut state, &mut props);
        assert!(state.submitting);
        let commands = reduce(ListAction::CreateDeferredTodo, &mut state, &mut props);
        assert_eq!(
            commands,
            vec![create_todo_request_action(
                Link::new("http://some.api/todoLater"),
                TodoForm::new("someTask")
            )]
        );
        assert_eq!(state.todo.task, "");
        assert!(!state.submitting);
    }

    #[test]
    fn test_displace_without_link_still_resets() {
        let (mut state, mut props) = setup();
        reduce(ListAction::TaskChanged("someTask".to_string()), &mut state, &mut props);
        reduce(ListAction::Submit, &mut state, &mut props);
        let commands = reduce(ListAction::DisplaceTodo, &mut state, &mut props);
        assert!(commands.is_empty());
        assert_eq!(state.todo.task, "");
        assert!(!state.submitting);

        props.list_and_link.list.links.displace = Some(Link::new("displaceHref"));
        reduce(ListAction::TaskChanged("other".to_string()), &mut state, &mut props);
        let commands = reduce(ListAction::DisplaceTodo, &mut state, &mut props);
        assert_eq!(
            commands,
            vec![displace_todo_request_action(
                Link::new("displaceHref"),
                TodoForm::new("other")
            )]
        );
    }

    #[test]
    fn test_link_gated_commands() {
        let (mut state, mut props) = setup();
        assert!(reduce(ListAction::Pull, &mut state, &mut props).is_empty());
        assert!(reduce(ListAction::Escalate, &mut state, &mut props).is_empty());
        props.list_and_link.list.links.pull = Some(Link::new("pullHref"));
        props.list_and_link.list.links.escalate = Some(Link::new("escalateHref"));
        assert_eq!(
            reduce(ListAction::Pull, &mut state, &mut props),
            vec![pull_todos_request_action(Link::new("pullHref"))]
        );
        assert_eq!(
            reduce(ListAction::Escalate, &mut state, &mut props),
            vec![escalate_todos_request_action(Link::new("escalateHref"))]
        );
    }

    #[test]
    fn test_todo_commands_on_active_tab() {
        let (mut state, mut props) = setup();
        assert_eq!(
            reduce(ListAction::CompleteTodo(0), &mut state, &mut props),
            vec![complete_todo_request_action(Link::new("completeHref"))]
        );
        assert_eq!(
            reduce(ListAction::MoveTodo(0, 0), &mut state, &mut props),
            vec![move_todo_request_action(Link::new("moveHref"))]
        );
        assert!(reduce(ListAction::MoveTodo(0, 1), &mut state, &mut props).is_empty());
        assert!(reduce(ListAction::DeleteTodo(0), &mut state, &mut props).is_empty());
        assert!(reduce(ListAction::CompleteTodo(3), &mut state, &mut props).is_empty());
    }

    #[test]
    fn test_locked_deferred_todos_are_not_actionable() {
        let (mut state, mut props) = setup();
        state.active_tab = "deferredname".to_string();
        assert!(reduce(ListAction::DeleteTodo(0), &mut state, &mut props).is_empty());
        state.unlock_duration = 0;
        assert_eq!(
            reduce(ListAction::DeleteTodo(0), &mut state, &mut props),
            vec![delete_todo_request_action(Link::new("deleteLaterHref"))]
        );
    }
}
