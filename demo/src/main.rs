//! MediChain portal command-line client.
//!
//! Signs in against the demo credential tables, keeps the session in a JSON
//! file between invocations, and prints the signed-in role's dashboard panels.
//!
//! Usage:
//!   cargo run -p medichain -- login --email doctor@example.com --password password123 --role doctor
//!   cargo run -p medichain -- whoami
//!   cargo run -p medichain -- dashboard --panel appointments
//!   cargo run -p medichain -- logout
//!   cargo run -p medichain -- demo

mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use medichain_config::{PortalConfig, StorageBackend};
use medichain_contracts::{
    error::{PortalError, PortalResult},
    form::{LoginForm, RegistrationForm},
    session::Role,
};
use medichain_ref_portal::{
    panels::{
        analytics::{ChartKind, TimeRange},
        appointments::AppointmentTab,
        dashboard::Panel,
        registration,
    },
    walkthrough::run_walkthrough,
    Portal,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// MediChain healthcare portal demo.
///
/// Sign in as a doctor or a patient and browse that role's dashboard. The
/// session is cached on disk, so it survives between invocations until you
/// log out.
#[derive(Parser)]
#[command(
    name = "medichain",
    about = "MediChain healthcare portal demo",
    long_about = "Role-scoped sign-in over fixed demo accounts, a durable session cache,\n\
                  and the doctor and patient dashboards."
)]
struct Cli {
    /// Portal configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the session store file from the configuration.
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in to the doctor or patient portal.
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// doctor or patient.
        #[arg(long, default_value = "patient")]
        role: Role,
        /// Accepted for parity with the login form. Sessions are always kept.
        #[arg(long)]
        remember_me: bool,
    },
    /// Sign out and clear the cached session.
    Logout,
    /// Show who is signed in.
    Whoami {
        #[arg(long)]
        json: bool,
    },
    /// Print a panel of the signed-in role's dashboard.
    Dashboard(DashboardArgs),
    /// Validate a registration form. No account is created.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "patient")]
        role: Role,
    },
    /// Run the scripted session lifecycle against in-memory storage.
    Demo,
}

#[derive(Args)]
pub struct DashboardArgs {
    /// dashboard, patients, appointments, records, notifications, analytics
    /// or settings.
    #[arg(long, default_value = "dashboard")]
    pub panel: Panel,
    /// Filter the patients or records list.
    #[arg(long)]
    pub search: Option<String>,
    /// Appointments tab: upcoming or past.
    #[arg(long, default_value = "upcoming", value_parser = parse_tab)]
    pub tab: AppointmentTab,
    /// Analytics range: week, month or year.
    #[arg(long, default_value = "week")]
    pub range: TimeRange,
    /// Analytics chart: line, bar or pie.
    #[arg(long, default_value = "line", value_parser = parse_chart)]
    pub chart: ChartKind,
    /// Settings: flip a notification or privacy option by id.
    #[arg(long)]
    pub toggle: Option<String>,
    /// Settings: flip dark mode.
    #[arg(long)]
    pub dark_mode: bool,
    /// Emit JSON instead of text where the panel supports it.
    #[arg(long)]
    pub json: bool,
}

fn parse_tab(s: &str) -> Result<AppointmentTab, String> {
    match s.to_ascii_lowercase().as_str() {
        "upcoming" => Ok(AppointmentTab::Upcoming),
        "past" => Ok(AppointmentTab::Past),
        other => Err(format!("unknown tab '{}'", other)),
    }
}

fn parse_chart(s: &str) -> Result<ChartKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "line" => Ok(ChartKind::Line),
        "bar" => Ok(ChartKind::Bar),
        "pie" => Ok(ChartKind::Pie),
        other => Err(format!("unknown chart '{}'", other)),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match load_config(&cli) {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        debug!(error = %e, "command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> PortalResult<PortalConfig> {
    let mut config = PortalConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.storage {
        config.storage.backend = StorageBackend::File;
        config.storage.path = path.clone();
    }
    Ok(config)
}

// ── Command dispatch ──────────────────────────────────────────────────────────

async fn run(command: Command, config: PortalConfig) -> PortalResult<()> {
    match command {
        Command::Login {
            email,
            password,
            role,
            remember_me,
        } => {
            let form = LoginForm {
                email,
                password,
                role,
                remember_me,
            };
            login(&Portal::from_config(&config), form).await
        }
        Command::Logout => {
            let portal = Portal::from_config(&config);
            portal.manager().logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami { json } => whoami(&Portal::from_config(&config), json),
        Command::Dashboard(args) => render::dashboard(&Portal::from_config(&config), &args),
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            role,
        } => {
            let receipt = registration::register(&RegistrationForm {
                name,
                email,
                password,
                confirm_password,
                role,
            })?;
            println!("{}", receipt.message);
            println!("  Reference: {}", receipt.reference);
            Ok(())
        }
        Command::Demo => {
            print_banner();
            let steps = run_walkthrough(&config).await;
            let failed = steps.iter().filter(|s| !s.passed).count();
            if failed > 0 {
                eprintln!("Walkthrough finished with {} failed step(s).", failed);
                std::process::exit(1);
            }
            println!("Walkthrough completed successfully.");
            Ok(())
        }
    }
}

async fn login(portal: &Portal, form: LoginForm) -> PortalResult<()> {
    form.validate()?;

    println!("Signing in...");
    let session = portal
        .manager()
        .login(form.email.trim(), &form.password, form.role)
        .await?;

    println!("Welcome, {} ({})", session.display_name, session.role.label());
    println!("  Dashboard: {}", session.role.dashboard_path());
    Ok(())
}

fn whoami(portal: &Portal, json: bool) -> PortalResult<()> {
    let session = portal.manager().current_session();
    if json {
        let out = serde_json::to_string_pretty(&session).map_err(|e| PortalError::Storage {
            reason: format!("failed to encode session: {}", e),
        })?;
        println!("{}", out);
        return Ok(());
    }

    match session {
        Some(s) => {
            println!("{} <{}>", s.display_name, s.email);
            println!("  Role:       {}", s.role.label());
            println!("  Session:    {}", s.session_id.0);
            println!("  Signed in:  {}", s.authenticated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("MediChain Healthcare Portal");
    println!("Session Lifecycle Demo");
    println!("=============================");
    println!();
    println!("Session rules exercised:");
    println!("  [1] Credentials are checked only against the requested role's table");
    println!("  [2] A failed login never touches the current session");
    println!("  [3] Only one login may be pending at a time");
    println!("  [4] The session is cached in durable storage and restored on start");
    println!("  [5] Logout clears memory and storage, and is idempotent");
    println!();
    println!("Demo accounts (password: password123):");
    for role in Role::ALL {
        println!("  {:<8} {}@example.com", role.as_str(), role.as_str());
    }
    println!();
}
