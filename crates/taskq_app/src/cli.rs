use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use taskq_core::{JobRequest, TaskKind};
use taskq_logging::taskq_info;

use crate::config::{Overrides, PollModeSetting, Settings};
use crate::platform::logging::{self, LogDestination};
use crate::platform::{Outcome, Session, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "taskq", version)]
#[command(about = "Submit tasks to the task queue API and follow them until they finish")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Settings file (RON). If omitted, uses ./taskq.ron if present.
    #[arg(long, env = "TASKQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the task API.
    #[arg(long, env = "TASKQ_BASE_URL")]
    pub base_url: Option<String>,

    /// Milliseconds between status polls.
    #[arg(long, env = "TASKQ_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Whether polls wait for the previous response or fire on a fixed cadence.
    #[arg(long, value_enum, env = "TASKQ_POLL_MODE")]
    pub poll_mode: Option<PollModeSetting>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored status output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a URL.
    ScanUrl { url: String },
    /// Look up the IP address of a hostname.
    FetchIp { hostname: String },
    /// Read submissions from stdin, one per line.
    Interactive,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            interval_ms: self.interval_ms,
            poll_mode: self.poll_mode,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

pub fn dispatch(args: Args) -> Result<ExitCode> {
    let settings = Settings::resolve(args.config.as_deref(), &args.overrides())?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(args.log, level);
    taskq_info!(
        "taskq starting base_url={} interval_ms={} poll_mode={:?}",
        settings.base_url,
        settings.interval_ms,
        settings.poll_mode
    );

    let color = !args.no_color && io::stdout().is_terminal();
    let renderer = TerminalRenderer::stdout(color);
    let mut session = Session::new(settings.engine_settings(), renderer)
        .context("starting task engine")?;

    let request = match args.cmd {
        Command::ScanUrl { url } => JobRequest::new(TaskKind::ScanUrl, url),
        Command::FetchIp { hostname } => JobRequest::new(TaskKind::FetchIp, hostname),
        Command::Interactive => {
            session.run_interactive(io::BufReader::new(io::stdin()));
            return Ok(ExitCode::SUCCESS);
        }
    };

    match session.run_once(request) {
        Outcome::Completed => Ok(ExitCode::SUCCESS),
        Outcome::Failed => Ok(ExitCode::FAILURE),
    }
}
