use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use url::Url;

use crate::components::document::Document;
use crate::components::header;
use crate::components::list::{ListAction, ListView, Props};
use crate::components::login::{self, FormKind, LoginAction, LoginState};
use crate::components::views::View;
use crate::environment::repository::RepositoryError;
use crate::environment::types::{AppEvent, CompletedAt, Errors};
use crate::environment::{Environment, Repository};
use crate::store::Store;

#[derive(Parser, Debug)]
#[command(name = "doer")]
#[command(about = "Terminal client for the doer todo service")]
struct Cli {
    /// Base url of the api
    #[arg(long, env = "DOER_API_URL", default_value = "http://localhost:8080/")]
    api: Url,

    /// Where the session is kept
    #[arg(long, env = "DOER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the list
    List {
        /// Show the deferred todos instead
        #[arg(long)]
        deferred: bool,
    },
    /// Show completed todos
    History,
    /// Add a todo for now
    Add {
        task: String,
        /// Push the oldest todo to later to make room
        #[arg(long)]
        displace: bool,
    },
    /// Add a todo for later
    Later { task: String },
    /// Complete the n-th todo
    Complete { n: usize },
    /// Delete the n-th todo
    Delete { n: usize },
    Pull,
    Escalate,
    Unlock,
    /// Count down until the deferred list unlocks
    Watch,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No data directory available, pass --data-dir")]
    NoDataDirectory,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Runtime(#[from] std::io::Error),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("The server did not answer with a list")]
    NoList,
    #[error("There is no todo {0}")]
    NoSuchTodo(usize),
    #[error("The list does not offer {0} right now")]
    Unavailable(&'static str),
    #[error("{0}")]
    Rejected(String),
}

pub fn run() -> ExitCode {
    use env_logger::Env;
    use std::io::Write;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), AppError> {
    let directory = cli
        .data_dir
        .or_else(Repository::default_directory)
        .ok_or(AppError::NoDataDirectory)?;
    let repository = Repository::new(directory)?;
    let (environment, events) = Environment::new(cli.api, Arc::new(repository));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(async move {
        let mut store = Store::new(environment);
        command(&mut store, cli.command).await
    });
    for AppEvent::Navigate(route) in events.try_iter() {
        log::debug!("navigated to {route}");
    }
    result
}

async fn command(store: &mut Store, command: Command) -> Result<(), AppError> {
    match command {
        Command::Signup { email, password } => {
            submit_form(store, FormKind::Signup, email, password).await
        }
        Command::Login { email, password } => {
            submit_form(store, FormKind::Login, email, password).await
        }
        Command::Logout => {
            for item in header::menu(store.environment()) {
                store.dispatch(header::select(item));
            }
            store.settle().await;
            println!("Logged out");
            Ok(())
        }
        Command::List { deferred } => {
            let mut view = load_list(store).await?;
            if deferred {
                let tab = view.deferred_tab();
                view.send(ListAction::SelectTab(tab.key));
            }
            print_list(&view);
            Ok(())
        }
        Command::History => {
            if !View::History.mount(store.environment(), &store.dispatcher()) {
                return Err(AppError::NotLoggedIn);
            }
            store.settle().await;
            check_errors(&store.state().errors)?;
            for todo in store.state().completed_list.todos.iter() {
                match &todo.completed_at {
                    CompletedAt::Valid(date) => {
                        println!("{} {}", date.format("%Y-%m-%d %H:%M"), todo.task)
                    }
                    CompletedAt::Invalid(raw) => println!("{raw} {}", todo.task),
                }
            }
            Ok(())
        }
        Command::Add { task, displace } => {
            list_command(store, |view| {
                view.send(ListAction::TaskChanged(task));
                view.send(ListAction::Submit);
                if !displace {
                    view.send(ListAction::CreateTodo);
                } else if view.displace_link().is_some() {
                    view.send(ListAction::DisplaceTodo);
                } else {
                    return Err(AppError::Unavailable("displace"));
                }
                Ok(())
            })
            .await
        }
        Command::Later { task } => {
            list_command(store, |view| {
                view.send(ListAction::TaskChanged(task));
                view.send(ListAction::CreateDeferredTodo);
                Ok(())
            })
            .await
        }
        Command::Complete { n } => {
            list_command(store, |view| {
                let index = index(view, n)?;
                view.send(ListAction::CompleteTodo(index));
                Ok(())
            })
            .await
        }
        Command::Delete { n } => {
            list_command(store, |view| {
                let index = index(view, n)?;
                view.send(ListAction::DeleteTodo(index));
                Ok(())
            })
            .await
        }
        Command::Pull => {
            list_command(store, |view| {
                if view.pull_link().is_none() {
                    return Err(AppError::Unavailable("pull"));
                }
                view.send(ListAction::Pull);
                Ok(())
            })
            .await
        }
        Command::Escalate => {
            list_command(store, |view| {
                if view.escalate_link().is_none() {
                    return Err(AppError::Unavailable("escalate"));
                }
                view.send(ListAction::Escalate);
                Ok(())
            })
            .await
        }
        Command::Unlock => {
            list_command(store, |view| {
                let tab = view.deferred_tab();
                view.send(ListAction::SelectTab(tab.key));
                if let Some(confirmation) = view.unlock_confirmation() {
                    println!("{}\n{}", confirmation.title, confirmation.body);
                    view.send(ListAction::ConfirmUnlock);
                }
                Ok(())
            })
            .await
        }
        Command::Watch => watch(store).await,
    }
}

async fn submit_form(
    store: &mut Store,
    kind: FormKind,
    email: String,
    password: String,
) -> Result<(), AppError> {
    let mut state = LoginState::new(kind);
    for action in [
        LoginAction::EmailChanged(email),
        LoginAction::PasswordChanged(password),
        LoginAction::Submit,
    ] {
        if let Some(action) = login::reduce(action, &mut state, store.environment()) {
            store.dispatch(action);
        }
    }
    store.settle().await;
    let errors = &store.state().errors;
    for field in ["email", "password"] {
        for message in login::field_messages(errors, field) {
            println!("{field}: {message}");
        }
    }
    check_errors(errors)?;
    if store.state().session.token.is_none() {
        return Err(AppError::NotLoggedIn);
    }
    println!("Logged in");
    Ok(())
}

async fn load_list(store: &mut Store) -> Result<ListView, AppError> {
    if !View::Todos.mount(store.environment(), &store.dispatcher()) {
        return Err(AppError::NotLoggedIn);
    }
    store.settle().await;
    check_errors(&store.state().errors)?;
    let props = Props::from_store(store.state()).ok_or(AppError::NoList)?;
    Ok(ListView::new(props, store.dispatcher(), Document::default()))
}

/// Loads the list, lets `f` drive the list view and prints the list the
/// server answers with
async fn list_command(
    store: &mut Store,
    f: impl FnOnce(&mut ListView) -> Result<(), AppError>,
) -> Result<(), AppError> {
    let mut view = load_list(store).await?;
    f(&mut view)?;
    store.settle().await;
    check_errors(&store.state().errors)?;
    if let Some(props) = Props::from_store(store.state()) {
        view.receive(props);
    }
    print_list(&view);
    Ok(())
}

async fn watch(store: &mut Store) -> Result<(), AppError> {
    let mut view = load_list(store).await?;
    view.mount();
    while view.is_counting() {
        println!("{}", view.deferred_tab().title);
        view.next().await;
        store.drain();
    }
    store.settle().await;
    if let Some(props) = Props::from_store(store.state()) {
        view.receive(props);
    }
    print_list(&view);
    Ok(())
}

/// Todos are numbered from 1 on the terminal
fn index(view: &ListView, n: usize) -> Result<usize, AppError> {
    if n == 0 || n > view.visible_todos().len() {
        return Err(AppError::NoSuchTodo(n));
    }
    Ok(n - 1)
}

fn check_errors(errors: &Errors) -> Result<(), AppError> {
    if errors.is_empty() {
        return Ok(());
    }
    let messages = errors
        .global_errors
        .iter()
        .map(|e| e.message.clone())
        .chain(
            errors
                .field_errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message)),
        )
        .join(", ");
    Err(AppError::Rejected(messages))
}

fn print_list(view: &ListView) {
    let tabs = [view.now_tab(), view.deferred_tab()];
    let header = tabs
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.title)
            } else {
                tab.title.clone()
            }
        })
        .join(" | ");
    println!("{header}");
    for (n, todo) in view.visible_todos().iter().enumerate() {
        println!("{:>3}. {}", n + 1, todo.task);
    }
    let available = affordances(view);
    if !available.is_empty() {
        println!("available: {}", available.join(" / "));
    }
}

/// The list wide commands the server currently links to
fn affordances(view: &ListView) -> Vec<&'static str> {
    [
        ("pull", view.pull_link().is_some()),
        ("escalate", view.escalate_link().is_some()),
    ]
    .into_iter()
    .filter_map(|(name, available)| available.then_some(name))
    .collect()
}
