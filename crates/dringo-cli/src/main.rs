//! `dringo` CLI — operator tooling for the Dringo waitlist.
//!
//! Reads and writes the same waitlist file the server uses, and can run a
//! signup through the browser workflow (opaque remote call with a local
//! fallback store) for testing integrations from a terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use dringo_core::client::{HttpRemote, LocalWaitlist, SubmissionOrchestrator, SubmissionOutcome, WaitlistForm};
use dringo_core::email::is_valid_email;
use dringo_core::entry::{encode_entries_pretty, is_listed};
use dringo_core::registry::{DEFAULT_WAITLIST_KEY, RegistrationOutcome, WaitlistRegistry};
use dringo_storage::FileBackend;

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// Dringo — waitlist tooling.
#[derive(Parser)]
#[command(
    name = "dringo",
    version,
    about = "Dringo CLI — inspect the waitlist and test signups",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         DRINGO_DATA_DIR       Directory holding the waitlist file (default: ./data)\n  \
         DRINGO_WAITLIST_KEY   Waitlist file name (default: waitlist.json)\n  \
         DRINGO_REMOTE_URL     Endpoint used by `submit`\n\n\
         {DIM}Examples:{RESET}\n  \
         dringo list\n  \
         dringo add user@example.com\n  \
         dringo submit user@example.com --endpoint https://example.com/exec"
    ),
)]
struct Cli {
    /// Directory holding the waitlist file.
    #[arg(long, env = "DRINGO_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Waitlist file name inside the data directory.
    #[arg(long, env = "DRINGO_WAITLIST_KEY", default_value = DEFAULT_WAITLIST_KEY)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every waitlist entry in registration order.
    List {
        /// Print the raw JSON array instead of a table.
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Print the number of entries.
    Count,
    /// Register an email exactly as the HTTP endpoint would.
    Add {
        /// Email address to register.
        email: String,
    },
    /// Check whether an email is on the waitlist (ignoring case).
    Check {
        /// Email address to look up.
        email: String,
    },
    /// Run a signup through the client workflow: remote call, then local fallback.
    Submit {
        /// Email address as typed into the form.
        email: String,
        /// Remote signup endpoint (form-encoded POST, response ignored).
        #[arg(long, env = "DRINGO_REMOTE_URL")]
        endpoint: String,
        /// Directory used as the local fallback store.
        #[arg(long, env = "DRINGO_LOCAL_DIR", default_value = "./.dringo-local")]
        local_dir: PathBuf,
        /// Give up on the remote call after this many seconds (no limit by default).
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<28}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

// ── Commands ─────────────────────────────────────────────────────────

fn open_registry(data_dir: &Path, key: &str) -> Result<WaitlistRegistry> {
    let storage = FileBackend::open(data_dir)
        .with_context(|| format!("failed to open data dir {}", data_dir.display()))?;
    Ok(WaitlistRegistry::new(Arc::new(storage), key))
}

async fn cmd_list(registry: &WaitlistRegistry, json: bool) -> Result<()> {
    let entries = registry.entries().await?;

    if json {
        let bytes = encode_entries_pretty(&entries)?;
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    }

    header("📋", "Waitlist");
    if entries.is_empty() {
        println!("  {DIM}(empty){RESET}");
    }
    for entry in &entries {
        kv_line(&entry.email, &entry.ts_display());
    }
    println!();
    Ok(())
}

async fn cmd_count(registry: &WaitlistRegistry) -> Result<()> {
    let entries = registry.entries().await?;
    println!("{}", entries.len());
    Ok(())
}

async fn cmd_add(registry: &WaitlistRegistry, email: &str) -> Result<()> {
    match registry.register(email).await? {
        RegistrationOutcome::Registered => success(&format!("{email} added to the waitlist")),
        RegistrationOutcome::AlreadyRegistered => warning(&format!("{email} is already on the waitlist")),
        RegistrationOutcome::InvalidEmail => bail!("'{email}' is not a valid email address"),
    }
    Ok(())
}

async fn cmd_check(registry: &WaitlistRegistry, email: &str) -> Result<()> {
    if !is_valid_email(email) {
        bail!("'{email}' is not a valid email address");
    }
    let entries = registry.entries().await?;
    if is_listed(&entries, email) {
        success(&format!("{email} is on the waitlist"));
        Ok(())
    } else {
        bail!("{email} is not on the waitlist")
    }
}

async fn cmd_submit(
    email: &str,
    endpoint: &str,
    local_dir: &Path,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let remote = HttpRemote::new(endpoint, timeout_secs.map(Duration::from_secs))?;
    let local_storage = FileBackend::open(local_dir)
        .with_context(|| format!("failed to open local store {}", local_dir.display()))?;
    let orchestrator =
        SubmissionOrchestrator::new(Arc::new(remote), LocalWaitlist::new(Arc::new(local_storage)));

    let mut form = WaitlistForm::new(email);
    let outcome = orchestrator.submit(&mut form).await;

    header("✉", "Signup");
    kv_line("Endpoint", endpoint);
    kv_line("Outcome", &format!("{outcome:?}"));
    println!();

    match outcome {
        SubmissionOutcome::RemoteAccepted | SubmissionOutcome::AcceptedLocally => success(&form.message),
        SubmissionOutcome::AlreadyRegistered => warning(&form.message),
        SubmissionOutcome::Rejected(_) => bail!("{}", form.message),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { json } => cmd_list(&open_registry(&cli.data_dir, &cli.key)?, json).await,
        Commands::Count => cmd_count(&open_registry(&cli.data_dir, &cli.key)?).await,
        Commands::Add { email } => cmd_add(&open_registry(&cli.data_dir, &cli.key)?, &email).await,
        Commands::Check { email } => cmd_check(&open_registry(&cli.data_dir, &cli.key)?, &email).await,
        Commands::Submit {
            email,
            endpoint,
            local_dir,
            timeout_secs,
        } => cmd_submit(&email, &endpoint, &local_dir, timeout_secs).await,
    }
}
