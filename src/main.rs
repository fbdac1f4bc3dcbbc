use anyhow::{Context, bail};
use clap::Parser;
use dotenv::dotenv;
use std::env;
use task_sync_client::domain::auth::driving_ports::AuthPort;
use task_sync_client::domain::auth::{AuthService, Credential};
use task_sync_client::domain::todo::driving_ports::{TaskPort, TaskQueryPort};
use task_sync_client::domain::todo::{NewTask, TaskService, UpdateTask};
use task_sync_client::domain::ui::EditedTask;
use task_sync_client::domain::ui::driven_ports::EditState;
use task_sync_client::domain::MutationOutcome;
use task_sync_client::http_api::ApiConnectivity;
use task_sync_client::http_api::http_auth_driven_ports::HttpAuthApi;
use task_sync_client::http_api::http_todo_driven_ports::HttpTaskApi;
use task_sync_client::query_cache::InMemoryQueryCache;
use task_sync_client::ui_state::UiStore;
use task_sync_client::{app_env, logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "task-sync")]
#[command(about = "Command-line client for the task API")]
struct Cli {
    /// Base URL of the task API. Falls back to the API_URL environment variable
    #[arg(long)]
    api_url: Option<String>,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account
    Signup,
    /// Print every task
    List,
    /// Add a task
    Create {
        #[arg(short, long)]
        title: String,
    },
    /// Change a task's title
    Update {
        id: u32,
        #[arg(short, long)]
        title: String,
    },
    /// Remove a task
    Delete { id: u32 },
}

/// Everything a command needs to talk to the API and track UI state
struct Session {
    ext_cxn: ApiConnectivity,
    cache: InMemoryQueryCache,
    ui: UiStore,
}

/// Converts a failed mutation into an error for the CLI to exit with
fn succeeded<T>(outcome: MutationOutcome<T>) -> Result<T, anyhow::Error> {
    match outcome {
        MutationOutcome::Succeeded(data) => Ok(data),
        MutationOutcome::Failed { message } => bail!(message),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let cli = Cli::parse();

    let otel_exporters = match (
        env::var(app_env::OTEL_SPAN_EXPORT_URL),
        env::var(app_env::OTEL_METRIC_EXPORT_URL),
    ) {
        (Ok(traces_url), Ok(metrics_url)) => {
            Some(logging::init_exporters(&traces_url, &metrics_url)?)
        }
        _ => None,
    };
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    let api_url = match cli.api_url {
        Some(url) => url,
        None => env::var(app_env::API_URL)
            .with_context(|| format!("pass --api-url or set {}", app_env::API_URL))?,
    };
    let session = Session {
        ext_cxn: ApiConnectivity::new(&api_url)?,
        cache: InMemoryQueryCache::new(),
        ui: UiStore::new(),
    };
    let credential = Credential {
        email: cli.email,
        password: cli.password,
    };

    if let Commands::Signup = cli.command {
        let outcome = AuthService
            .register(&credential, &session.ext_cxn, &HttpAuthApi, &session.ui)
            .await;
        succeeded(outcome)?;
        println!("Account created for {credential}");
        return Ok(());
    }

    let outcome = AuthService
        .login(
            &credential,
            &session.ext_cxn,
            &HttpAuthApi,
            &session.ui,
            &session.ui,
        )
        .await;
    succeeded(outcome)?;

    let command_result = run_task_command(&session, cli.command).await;

    let logout = AuthService
        .logout(
            &session.ext_cxn,
            &HttpAuthApi,
            &session.ui,
            &session.ui,
            &session.ui,
        )
        .await;
    command_result?;
    succeeded(logout)?;

    Ok(())
}

/// Runs a task command inside an active session and prints the resulting task list
async fn run_task_command(session: &Session, command: Commands) -> Result<(), anyhow::Error> {
    let ext_cxn = &session.ext_cxn;
    let cache = &session.cache;
    let ui = &session.ui;

    // Loading the list first means the mutation below patches it in place of a re-fetch
    TaskService
        .fetch_tasks(ext_cxn, &HttpTaskApi, cache, ui)
        .await
        .context("loading tasks")?;

    match command {
        Commands::Signup | Commands::List => {}
        Commands::Create { title } => {
            let created = succeeded(
                TaskService
                    .create_task(&NewTask { title }, ext_cxn, &HttpTaskApi, cache, ui, ui)
                    .await,
            )?;
            info!("Created task {}", created.id);
        }
        Commands::Update { id, title } => {
            ui.set_edited_task(EditedTask {
                id,
                title: title.clone(),
            });
            succeeded(
                TaskService
                    .update_task(&UpdateTask { id, title }, ext_cxn, &HttpTaskApi, cache, ui, ui)
                    .await,
            )?;
        }
        Commands::Delete { id } => {
            succeeded(
                TaskService
                    .delete_task(id, ext_cxn, &HttpTaskApi, cache, ui, ui)
                    .await,
            )?;
        }
    }

    let tasks = TaskService
        .fetch_tasks(ext_cxn, &HttpTaskApi, cache, ui)
        .await
        .context("reading tasks")?;
    for task in tasks.iter() {
        println!(
            "{:>5}  {}  (updated {})",
            task.id,
            task.title,
            task.updated_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
