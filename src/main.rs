mod commands;
mod config;
mod diagnostics;
mod error;
mod identifier;
mod linkcheck;
mod pipeline;
mod pool;
mod resolver;
mod scanner;
mod types;
mod version;
mod xrefmap;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::ReportFormat;
use crate::config::{Overrides, SiteSetting};

#[derive(Parser)]
#[command(name = "xrefmaps", about = "Point DocFX xref map links at the hosted Unity documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every href in one or more xref maps; drop overload entries
    Fix {
        /// Map files, or directories searched for xrefmap.yml
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Write the result here instead of in place (single map only)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Documentation root; `{0}` is replaced by the short version of --tag
        #[arg(long)]
        api_url: Option<String>,
        /// Editor or package version, e.g. 6000.0.1f1 or 1.17.0
        #[arg(long)]
        tag: Option<String>,
        /// Site layout to target
        #[arg(long, value_enum)]
        site: Option<SiteSetting>,
        /// Namespace prefix dropped from editor page names (repeatable)
        #[arg(long = "trim-namespace", value_name = "NS")]
        trim_namespaces: Vec<String>,
        /// Regex that marks an api url as a package site
        #[arg(long)]
        package_pattern: Option<String>,
        /// Worker threads, 0 for one per core
        #[arg(long, short)]
        jobs: Option<usize>,
        /// Config file to use instead of ./.xrefmaps.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check that every href in a map answers with a 2xx status
    Test {
        /// Map file to check
        path: PathBuf,
        /// Concurrent requests, 0 for one per core
        #[arg(long, short)]
        jobs: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Config file to use instead of ./.xrefmaps.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let result = dispatch(cli.command);

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Load configuration for the chosen command and run it.
///
/// # Errors
///
/// Returns whatever the command or config loading fails with.
fn dispatch(command: Commands) -> Result<ExitCode, error::Error> {
    return match command {
        Commands::Fix {
            paths,
            output,
            api_url,
            tag,
            site,
            trim_namespaces,
            package_pattern,
            jobs,
            config,
        } => {
            let overrides = Overrides {
                api_url,
                jobs,
                package_pattern,
                site,
                trim_namespaces,
            };
            let config = commands::load_config(config.as_deref(), overrides)?;
            commands::fix(&paths, output.as_deref(), tag.as_deref(), &config)
        },
        Commands::Test {
            path,
            jobs,
            format,
            config,
        } => {
            let overrides = Overrides {
                jobs,
                ..Overrides::default()
            };
            let config = commands::load_config(config.as_deref(), overrides)?;
            commands::test(&path, format, &config)
        },
    };
}
