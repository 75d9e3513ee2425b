pub mod reducer;
pub mod view;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::components::document::{Document, ListenerId};
use crate::effect::Dispatcher;
use crate::environment::types::{Link, ListAndLink, Todo};
use crate::store::State as StoreState;

pub use reducer::{ListAction, Props, State, TICK_MILLIS};
pub use view::{Confirmation, TabView};

impl Props {
    /// Maps the store to the list view. `None` until a list was stored.
    pub fn from_store(state: &StoreState) -> Option<Self> {
        Some(Props {
            list_and_link: state.list.list_and_link.clone()?,
            selected_list: state.list.selected_list.clone(),
        })
    }
}

/// Sends a `Tick` every second until dropped
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn start(sender: flume::Sender<ListAction>) -> Self {
        let period = Duration::from_millis(TICK_MILLIS);
        let start = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(start, period);
            loop {
                interval.tick().await;
                if sender.send_async(ListAction::Tick).await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The main list. Holds the local ui state, runs the unlock countdown
/// while mounted and dispatches commands into the store.
pub struct ListView {
    state: State,
    props: Props,
    dispatcher: Dispatcher,
    document: Document,
    listener: Option<ListenerId>,
    timer: Option<Countdown>,
    sender: flume::Sender<ListAction>,
    receiver: flume::Receiver<ListAction>,
    visibility_sender: flume::Sender<bool>,
    visibility: flume::Receiver<bool>,
}

impl std::fmt::Debug for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("state", &self.state)
            .field("mounted", &self.is_mounted())
            .field("counting", &self.is_counting())
            .finish()
    }
}

impl ListView {
    pub fn new(props: Props, dispatcher: Dispatcher, document: Document) -> Self {
        let (sender, receiver) = flume::unbounded();
        let (visibility_sender, visibility) = flume::unbounded();
        Self {
            state: State::new(&props),
            props,
            dispatcher,
            document,
            listener: None,
            timer: None,
            sender,
            receiver,
            visibility_sender,
            visibility,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub fn is_counting(&self) -> bool {
        self.timer.is_some()
    }

    /// Needs a tokio runtime for the countdown
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        let id = self
            .document
            .add_visibility_listener(self.visibility_sender.clone());
        self.listener = Some(id);
        self.sync_timer();
    }

    pub fn unmount(&mut self) {
        if let Some(id) = self.listener.take() {
            self.document.remove_visibility_listener(id);
        }
        self.timer = None;
        self.state.unlock_duration = 0;
    }

    pub fn receive(&mut self, props: Props) {
        self.send(ListAction::Received(props));
    }

    pub fn send(&mut self, action: ListAction) {
        for command in reducer::reduce(action, &mut self.state, &mut self.props) {
            self.dispatcher.put(command);
        }
        self.sync_timer();
    }

    /// Applies everything that arrived so far without waiting
    pub fn pump(&mut self) {
        while let Ok(hidden) = self.visibility.try_recv() {
            self.send(ListAction::VisibilityChanged { hidden });
        }
        while let Ok(action) = self.receiver.try_recv() {
            self.send(action);
        }
    }

    /// Waits for the next tick or visibility change and applies it
    pub async fn next(&mut self) {
        let action = tokio::select! {
            Ok(hidden) = self.visibility.recv_async() => ListAction::VisibilityChanged { hidden },
            Ok(action) = self.receiver.recv_async() => action,
        };
        self.send(action);
    }

    fn sync_timer(&mut self) {
        let should_count = self.is_mounted() && self.state.is_locked();
        match (should_count, self.timer.is_some()) {
            (true, false) => self.timer = Some(Countdown::start(self.sender.clone())),
            (false, true) => self.timer = None,
            _ => (),
        }
    }

    pub fn now_tab(&self) -> TabView {
        view::now_tab(&self.state, &self.props)
    }

    pub fn deferred_tab(&self) -> TabView {
        view::deferred_tab(&self.state, &self.props)
    }

    pub fn unlock_confirmation(&self) -> Option<Confirmation> {
        view::unlock_confirmation(&self.state, &self.props)
    }

    pub fn visible_todos(&self) -> &[Todo] {
        view::visible_todos(&self.state, &self.props)
    }

    pub fn displace_link(&self) -> Option<&Link> {
        view::displace_link(&self.state, &self.props)
    }

    pub fn pull_link(&self) -> Option<&Link> {
        view::pull_link(&self.props)
    }

    pub fn escalate_link(&self) -> Option<&Link> {
        view::escalate_link(&self.props)
    }

    pub fn list_and_link(&self) -> &ListAndLink {
        &self.props.list_and_link
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        self.unmount();
    }
}
