//! CLI commands for xrefmaps: fix, test.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{Config, Overrides};
use crate::error;
use crate::linkcheck::{self, HttpProbe, LinkReport, LinkResult};
use crate::pipeline;
use crate::scanner;
use crate::xrefmap::{self, XrefMap};

/// How `test` prints its findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// One line per unreachable link.
    #[default]
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Load `--config` if given, `.xrefmaps.toml` from the working directory
/// otherwise, then apply flag overrides.
///
/// # Errors
///
/// Returns `Error::ConfigNotFound` for a missing explicit file, or config parse errors.
pub fn load_config(explicit: Option<&Path>, overrides: Overrides) -> Result<Config, error::Error> {
    let config = match explicit {
        Some(path) => Config::load_file(path)?,
        None => Config::load(Path::new("."))?,
    };
    return Ok(config.with_overrides(overrides));
}

/// Rewrite every map under `paths`, in place or to `output`.
///
/// Records that fail to resolve are logged and dropped; they never change the exit code.
///
/// # Errors
///
/// Returns errors from map discovery, config resolution, or map I/O.
pub fn fix(
    paths: &[PathBuf],
    output: Option<&Path>,
    tag: Option<&str>,
    config: &Config,
) -> Result<ExitCode, error::Error> {
    let maps = scanner::discover(paths)?;
    if output.is_some() && maps.len() != 1 {
        return Err(error::Error::AmbiguousOutput { count: maps.len() });
    }

    let settings = config.rewrite_settings(tag)?;
    tracing::info!(api_url = %settings.api_url, site = %settings.site, maps = maps.len(), "fixing xref maps");

    for map_path in &maps {
        let mut map = XrefMap::read(map_path)?;
        let report = pipeline::process(std::mem::take(&mut map.references), &settings);
        map.references = report.references;

        let destination = output.unwrap_or(map_path.as_path());
        map.write(destination)?;

        println!(
            "{}: {} kept, {} overloads, {} dropped",
            destination.display(),
            map.references.len(),
            report.overloads,
            report.dropped.len(),
        );
    }

    if maps.is_empty() {
        eprintln!("No {} files found.", xrefmap::FILE_NAME);
    }

    return Ok(ExitCode::SUCCESS);
}

/// Probe every href in one map. Exit code 1 if any link is unreachable.
///
/// # Errors
///
/// Returns errors from reading the map, building the HTTP client, or JSON output.
pub fn test(path: &Path, format: ReportFormat, config: &Config) -> Result<ExitCode, error::Error> {
    let map = XrefMap::read(path)?;
    let probe = HttpProbe::new()?;
    tracing::info!(path = %path.display(), links = map.references.len(), "checking links");

    let results = linkcheck::check_links(&map.references, &probe, config.jobs());
    let report = LinkReport::new(&results);

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print_unreachable(&report.unreachable),
    }

    if report.unreachable.is_empty() {
        eprintln!("All {} links reachable", report.checked);
        return Ok(ExitCode::SUCCESS);
    }
    eprintln!("{} of {} links unreachable", report.unreachable.len(), report.checked);
    return Ok(ExitCode::from(1));
}

/// Print one warning line per unreachable link.
fn print_unreachable(unreachable: &[&LinkResult]) {
    for result in unreachable {
        let href = result.href.as_deref().unwrap_or("<none>");
        println!("Invalid URL {href} for {} uid", result.uid);
    }
    return;
}
