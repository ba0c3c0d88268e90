// Rust guideline compliant 2026-10-14

//! Lead Dialer CLI
//!
//! Command-line interface for tracking leads through the calling pipeline.

use clap::Parser;
use leads_app::{AppError, ErrorCode, ErrorEnvelope, RepoContext};
use leads_cli::commands::{
    self, call::CallAction, create::CreateArgs, list::ListArgs, update::UpdateArgs,
    CommandContext,
};
use leads_cli::logging::{init_tracing, DEFAULT_LOG_LEVEL};
use leads_cli::terminal::print_error;
use leads_cli::{create_formatter, should_use_color};
use leads_core::{Config, Error as CoreError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "ldm",
    version,
    about = "Lead dialer: track leads from first call to qualification",
    long_about = "Tracks real-estate leads through pending, calling, answered, qualified, and dropped. Every status change is checked against a fixed transition table before it is saved.",
    after_help = "Examples:\n  ldm init\n  ldm create +92-300-1234567 --name \"Ahmed Khan\" --area \"DHA Lahore\"\n  ldm call start lead-a1b\n  ldm call no-answer lead-a1b\n  ldm call qualify lead-a1b --role buyer --result hot\n  ldm list --status pending\n  ldm transitions calling\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Display timestamps as absolute UTC times
    #[arg(long, global = true)]
    absolute_time: bool,

    /// Log level (overrides config log_level)
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: Option<String>,

    /// Append JSON log lines to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Repository root containing `.leads` (defaults to the current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Plain,
}

impl From<FormatArg> for leads_core::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => leads_core::OutputFormat::Json,
            FormatArg::Table => leads_core::OutputFormat::Table,
            FormatArg::Plain => leads_core::OutputFormat::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a lead repository in `.leads/`
    Init,

    /// Create a new pending lead
    Create {
        /// Phone number (unique by digits)
        phone: String,

        /// Contact name
        #[arg(long)]
        name: Option<String>,

        /// Area of interest
        #[arg(long)]
        area: Option<String>,

        /// Budget description
        #[arg(long)]
        budget: Option<String>,

        /// Lead source: new or old (defaults to config default_source)
        #[arg(long)]
        source: Option<String>,
    },

    /// List leads, newest first
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by result (hot, warm, cold)
        #[arg(long)]
        result: Option<String>,

        /// Filter by role (buyer, seller, renter)
        #[arg(long)]
        role: Option<String>,

        /// Filter by source (new, old)
        #[arg(long)]
        source: Option<String>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<usize>,

        /// Leads per page (default 50)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a lead, its call attempts, and its legal next statuses
    Show {
        /// Lead ID (full or partial)
        id: String,
    },

    /// Update lead fields and optionally its status
    Update {
        /// Lead ID (full or partial)
        id: String,

        /// New contact name
        #[arg(long)]
        name: Option<String>,

        /// New area of interest
        #[arg(long)]
        area: Option<String>,

        /// New budget description
        #[arg(long)]
        budget: Option<String>,

        /// New role (buyer, seller, renter)
        #[arg(long)]
        role: Option<String>,

        /// New result (hot, warm, cold)
        #[arg(long)]
        result: Option<String>,

        /// New status, checked against the transition table
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a lead and its call attempts
    Delete {
        /// Lead ID (full or partial)
        id: String,
    },

    /// Show the status transition table
    Transitions {
        /// Only show transitions out of this status
        status: Option<String>,
    },

    /// Place calls and record outcomes
    Call {
        #[command(subcommand)]
        action: CallAction,
    },

    /// Show lead counts by status and result
    Stats,

    /// Load sample leads into an empty repository
    Seed {
        /// Delete all leads and call attempts instead of seeding
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = RepoContext::discover(cli.repo.as_deref())
        .ok()
        .and_then(|repo| repo.load_config().ok());
    let format = match (cli.format, cli.json) {
        (Some(format), _) => format.into(),
        (None, true) => leads_core::OutputFormat::Json,
        (None, false) => config
            .as_ref()
            .map(|config| config.output_format)
            .unwrap_or_default(),
    };
    let json = format == leads_core::OutputFormat::Json;
    let use_color = should_use_color(cli.no_color);

    match run(cli, config.as_ref(), format, use_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(err, json, use_color),
    }
}

fn run(
    cli: Cli,
    config: Option<&Config>,
    format: leads_core::OutputFormat,
    use_color: bool,
) -> anyhow::Result<()> {
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.map(|config| config.log_level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let _guard = init_tracing(&log_level, cli.log_file.as_deref())?;

    let ctx = CommandContext {
        repo: cli.repo,
        formatter: create_formatter(format, use_color, cli.absolute_time),
        json: format == leads_core::OutputFormat::Json,
        use_color,
    };

    match cli.command {
        Some(Commands::Init) => commands::init::execute(&ctx),
        Some(Commands::Create {
            phone,
            name,
            area,
            budget,
            source,
        }) => commands::create::execute(
            CreateArgs {
                phone,
                name,
                area,
                budget,
                source,
            },
            &ctx,
        ),
        Some(Commands::List {
            status,
            result,
            role,
            source,
            page,
            limit,
        }) => commands::list::execute(
            ListArgs {
                status,
                result,
                role,
                source,
                page,
                limit,
            },
            &ctx,
        ),
        Some(Commands::Show { id }) => commands::show::execute(id, &ctx),
        Some(Commands::Update {
            id,
            name,
            area,
            budget,
            role,
            result,
            status,
        }) => commands::update::execute(
            UpdateArgs {
                id,
                name,
                area,
                budget,
                role,
                result,
                status,
            },
            &ctx,
        ),
        Some(Commands::Delete { id }) => commands::delete::execute(id, &ctx),
        Some(Commands::Transitions { status }) => commands::transitions::execute(status, &ctx),
        Some(Commands::Call { action }) => commands::call::execute(action, &ctx),
        Some(Commands::Stats) => commands::stats::execute(&ctx),
        Some(Commands::Seed { clear }) => commands::seed::execute(clear, &ctx),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Prints a failed command's error and picks the exit code.
///
/// Client errors exit with 2, everything else with 1.
fn report_error(err: anyhow::Error, json: bool, use_color: bool) -> ExitCode {
    let app = match err.downcast::<AppError>() {
        Ok(app) => Ok(app),
        Err(err) => match err.downcast::<CoreError>() {
            Ok(core) => Ok(AppError::Core(core)),
            Err(err) => match err.downcast::<std::io::Error>() {
                Ok(io) => Ok(AppError::Io(io)),
                Err(other) => Err(other),
            },
        },
    };

    let envelope = match &app {
        Ok(app) => ErrorEnvelope::from_error(app),
        Err(other) => ErrorEnvelope {
            status: "error",
            code: ErrorCode::Internal,
            message: format!("{:#}", other),
            details: None,
        },
    };

    if json {
        match serde_json::to_string_pretty(&envelope) {
            Ok(text) => println!("{}", text),
            Err(_) => print_error(use_color, &envelope.message),
        }
    } else {
        print_error(use_color, &envelope.message);
    }

    if envelope.code.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
