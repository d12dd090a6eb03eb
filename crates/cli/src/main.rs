//! DEER Hub CLI - Drive the portal from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in with a demo account
//! deer-hub login -e manager@deer.com -p password123
//!
//! # Submit a leave request
//! deer-hub leave submit -t annual --start 2025-07-01 --end 2025-07-03 -r "Family trip"
//!
//! # Upload a document
//! deer-hub upload --title "Handbook" --category policies --description "2025 edition" handbook.pdf
//!
//! # Search the library
//! deer-hub docs search handbook
//! ```
//!
//! # Commands
//!
//! - `login`, `register`, `logout`, `whoami` - Session management
//! - `visit` - Open a page through the access policy
//! - `leave` - Leave requests, drafts and balances
//! - `upload`, `docs` - Document upload and library
//! - `ticker`, `features`, `action` - Home page content and quick actions
//!
//! State lives under `DEER_HUB_DATA_DIR`, so a login persists between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deer_hub_core::DocumentId;
use deer_hub_portal::auth::{LoginForm, RegistrationForm};
use deer_hub_portal::config::LogFormat;
use deer_hub_portal::pages::Page;
use deer_hub_portal::upload::ViewMode;
use deer_hub_portal::{Portal, PortalConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Commands print their results for the terminal
#[allow(clippy::print_stdout, clippy::print_stderr)]
mod commands;

#[derive(Parser)]
#[command(name = "deer-hub")]
#[command(author, version, about = "DEER Hub employee portal")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a demo account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Role (`employee`, `manager`, `admin`)
        #[arg(short, long, default_value = "employee")]
        role: String,

        #[arg(short, long)]
        password: String,

        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the current session and what the portal would render
    Whoami,
    /// Open a page
    Visit {
        /// `home`, `login`, `leave` or `upload`
        page: Page,
    },
    /// Leave requests
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },
    /// Upload documents to the library
    Upload(UploadArgs),
    /// Browse the document library
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },
    /// Show the announcement ticker
    Ticker,
    /// Show the home page feature cards
    Features {
        /// Show the benefits of one feature
        title: Option<String>,
    },
    /// Activate a quick action card by title
    Action {
        title: String,
    },
}

#[derive(clap::Args)]
struct LeaveArgs {
    /// Leave type (`annual`, `sick`, `personal`, `emergency`, `bereavement`)
    #[arg(short = 't', long = "type", default_value = "")]
    leave_type: String,

    /// Overrides the priority suggested by the leave type
    #[arg(long)]
    priority: Option<String>,

    /// First day, `YYYY-MM-DD`
    #[arg(long, default_value = "")]
    start: String,

    /// Last day, `YYYY-MM-DD`
    #[arg(long, default_value = "")]
    end: String,

    #[arg(short, long, default_value = "")]
    reason: String,

    #[arg(long, default_value = "")]
    emergency_contact: String,

    /// Supporting documents
    #[arg(long = "attach")]
    attachments: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum LeaveAction {
    /// Submit a leave request
    Submit(LeaveArgs),
    /// Save the form as a draft
    Draft(LeaveArgs),
    /// Show the saved draft
    ShowDraft,
    /// Show the most recent requests
    Recent {
        /// Show every request
        #[arg(long)]
        all: bool,
    },
    /// Show leave balances
    Balance,
}

#[derive(clap::Args)]
struct UploadArgs {
    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "")]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "all")]
    access_level: String,

    /// Comma-separated
    #[arg(long, default_value = "")]
    tags: String,

    #[arg(long)]
    version_control: bool,

    files: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum DocsAction {
    /// List the library
    List {
        #[arg(long, default_value = "grid")]
        view: ViewMode,
    },
    /// Search titles, file names, tags and categories
    Search { query: String },
    /// Show the most recent uploads
    Recent,
    /// Download a document
    Download { id: DocumentId },
    /// Preview a document
    View { id: DocumentId },
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for the portal if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "deer_hub_portal=info,deer_hub_cli=info".into());

    // Logs go to stderr so stdout stays clean for `--json` output
    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = PortalConfig::from_env()?;
    init_tracing(config.log_format);

    let mut portal = Portal::open(&config)?;
    let out = commands::Output::new(cli.json);

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut portal, &out, LoginForm::new(email, password)).await?;
        }
        Commands::Register {
            name,
            email,
            role,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let form = RegistrationForm::new(name, email, role, password, confirm_password);
            commands::auth::register(&mut portal, &out, form).await?;
        }
        Commands::Logout => commands::auth::logout(&mut portal, &out).await?,
        Commands::Whoami => commands::auth::whoami(&portal, &out)?,
        Commands::Visit { page } => commands::home::visit(&mut portal, &out, page).await?,
        Commands::Leave { action } => match action {
            LeaveAction::Submit(args) => {
                let form = commands::leave::build_form(&args)?;
                commands::leave::submit(&mut portal, &out, form).await?;
            }
            LeaveAction::Draft(args) => {
                let form = commands::leave::build_form(&args)?;
                commands::leave::save_draft(&mut portal, &out, form).await?;
            }
            LeaveAction::ShowDraft => commands::leave::show_draft(&portal, &out)?,
            LeaveAction::Recent { all } => commands::leave::recent(&portal, &out, all)?,
            LeaveAction::Balance => commands::leave::balance(&portal, &out)?,
        },
        Commands::Upload(args) => {
            let form = commands::docs::build_form(args)?;
            commands::docs::upload(&mut portal, &out, form).await?;
        }
        Commands::Docs { action } => match action {
            DocsAction::List { view } => commands::docs::list(&mut portal, &out, view).await?,
            DocsAction::Search { query } => commands::docs::search(&portal, &out, &query)?,
            DocsAction::Recent => commands::docs::recent(&portal, &out)?,
            DocsAction::Download { id } => {
                commands::docs::download(&mut portal, &out, id).await?;
            }
            DocsAction::View { id } => commands::docs::view(&mut portal, &out, id).await?,
        },
        Commands::Ticker => commands::home::ticker(&portal, &out)?,
        Commands::Features { title } => commands::home::features(&out, title.as_deref())?,
        Commands::Action { title } => {
            commands::home::quick_action(&mut portal, &out, title).await?;
        }
    }
    Ok(())
}
