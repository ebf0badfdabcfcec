use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use kcheck_release::InstalledSource;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod config;

use commands::OutputFormat;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global_args: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Read settings from this file instead of the system and user configuration
    #[arg(global = true, long, env = "KCHECK_CONFIG_FILE", conflicts_with = "no_config")]
    config: Option<Utf8PathBuf>,

    /// Ignore all configuration files
    #[arg(global = true, long)]
    no_config: bool,

    /// File with the running kernel's banner [default: /proc/version]
    #[arg(global = true, long)]
    proc_version: Option<Utf8PathBuf>,

    /// Directory holding the installed kernel images [default: /boot]
    #[arg(global = true, long)]
    boot_dir: Option<Utf8PathBuf>,

    /// Where to look for installed kernels [default: auto]
    #[arg(global = true, long, value_enum)]
    source: Option<InstalledSource>,

    /// Output format
    #[arg(global = true, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Report whether a reboot is needed to run the newest installed kernel")]
    Check,
    #[command(about = "Print the version of the running kernel")]
    Running,
    #[command(about = "List the installed kernels, oldest first")]
    Installed,
    #[command(about = "Print the comparable form of raw kernel release strings")]
    Clean {
        #[arg(required = true)]
        releases: Vec<String>,
    },
    #[command(about = "Compare two kernel release strings")]
    Compare { a: String, b: String },
}

fn init_tracing(verbose: &Verbosity<WarnLevel>) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbose.tracing_level_filter().into())
        .with_env_var("KCHECK_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> miette::Result<ExitCode> {
    let global_args = &cli.global_args;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => return Ok(commands::check::check(global_args)),
        Commands::Running => commands::running::running(global_args)?,
        Commands::Installed => commands::installed::installed(global_args)?,
        Commands::Clean { releases } => commands::clean::clean(global_args, &releases)?,
        Commands::Compare { a, b } => commands::compare::compare(global_args, &a, &b)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.global_args.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(report) => {
            anstream::eprintln!("{report:?}");
            ExitCode::from(commands::check::Status::Unknown.code())
        }
    }
}
