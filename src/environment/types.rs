use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The scheduling tag of the list that is visible right away
pub const NOW: &str = "now";

// Hypermedia

/// A reference to a server side operation or resource.
/// Absence of a link means the operation is not available.
#[derive(Default, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// The default link carries no href and must never be followed
    pub fn is_empty(&self) -> bool {
        self.href.is_empty()
    }
}

/// Links discovered from `_links` maps, keyed by resource name
pub type Links = im::HashMap<String, Link>;

// Todos

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TodoForm {
    pub task: String,
}

impl TodoForm {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TodoLinks {
    #[serde(default)]
    pub delete: Option<Link>,
    #[serde(default)]
    pub complete: Option<Link>,
    #[serde(default)]
    pub update: Option<Link>,
    /// Target lists this todo can be moved to, in server order
    #[serde(default, rename = "move")]
    pub moves: Vec<Link>,
}

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub task: String,
    #[serde(default, rename = "_links")]
    pub links: TodoLinks,
}

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinks {
    #[serde(default)]
    pub create: Option<Link>,
    #[serde(default)]
    pub create_deferred: Option<Link>,
    #[serde(default)]
    pub completed: Option<Link>,
    #[serde(default)]
    pub pull: Option<Link>,
    #[serde(default)]
    pub displace: Option<Link>,
    #[serde(default)]
    pub unlock: Option<Link>,
    #[serde(default)]
    pub escalate: Option<Link>,
}

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub name: String,
    pub deferred_name: String,
    /// Milliseconds until the deferred list changes state. While it is
    /// non-zero the deferred list is locked.
    pub unlock_duration: u64,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub deferred_todos: Vec<Todo>,
    #[serde(default, rename = "_links")]
    pub links: ListLinks,
}

/// A list together with the link it was fetched from, so it can be
/// fetched again later
#[derive(Default, Clone, Debug, Eq, PartialEq)]
pub struct ListAndLink {
    pub list: List,
    pub list_link: Link,
}

// History

/// A completed todo as the server sends it
#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompletedTodo {
    pub task: String,
    pub completed_at: String,
}

/// Parsed completion time. Unparseable input is kept as-is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompletedAt {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl CompletedAt {
    pub fn parse(input: &str) -> Self {
        if let Ok(date) = DateTime::parse_from_rfc3339(input) {
            return CompletedAt::Valid(date.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            return CompletedAt::Valid(date.and_utc());
        }
        if let Some(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return CompletedAt::Valid(date.and_utc());
        }
        CompletedAt::Invalid(input.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CompletedAt::Valid(_))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompletedTodo {
    pub task: String,
    pub completed_at: CompletedAt,
}

impl From<&RawCompletedTodo> for CompletedTodo {
    fn from(value: &RawCompletedTodo) -> Self {
        Self {
            task: value.task.clone(),
            completed_at: CompletedAt::parse(&value.completed_at),
        }
    }
}

#[derive(Default, Clone, Debug, Eq, PartialEq)]
pub struct CompletedList {
    pub todos: Vec<CompletedTodo>,
}

// Errors

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GlobalError {
    pub message: String,
}

/// The validation error body. Both arrays are required for a body to
/// count as a validation error.
#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Errors {
    pub field_errors: Vec<FieldError>,
    pub global_errors: Vec<GlobalError>,
}

impl Errors {
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.field_errors.iter().filter(move |e| e.field == field)
    }
}

// Session

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignupInfo {
    pub email: String,
    pub password: String,
}

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub email: String,
    pub password: String,
}

#[derive(Default, Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub token: Option<String>,
}

// Response envelopes

#[derive(Clone, Debug, Deserialize)]
pub struct SessionToken {
    pub token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RootLinks {
    pub root: Link,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SessionResponse {
    pub session: SessionToken,
    #[serde(rename = "_links")]
    pub links: RootLinks,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListResponseLinks {
    pub list: Link,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListResponse {
    pub list: List,
    #[serde(rename = "_links")]
    pub links: ListResponseLinks,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResourcesResponse {
    #[serde(default, rename = "_links")]
    pub links: Links,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CompletedListResponse {
    pub todos: Vec<RawCompletedTodo>,
    #[serde(default, rename = "_links")]
    pub links: Links,
}

// Navigation

#[derive(IntoStaticStr, EnumIter, Display, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Route {
    #[strum(serialize = "/")]
    Root,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/signup")]
    Signup,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppEvent {
    Navigate(Route),
}
