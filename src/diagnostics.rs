use std::path::Path;

use crate::config;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// the command-line or config change that fixes it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ApiUrlTemplate { url } => render_api_url_template(url),
        Error::ConfigNotFound { path } => render_config_not_found(path),
        Error::InvalidApiUrl { reason, url } => render_invalid_api_url(url, reason),
        Error::InvalidPattern(inner) => render_invalid_pattern(&inner.to_string()),
        Error::MapNotFound { path } => render_map_not_found(path),
        Error::UnrecognizedVersion { tag } => render_unrecognized_version(tag),
        Error::YamlDe { path, source } => render_yaml_de(path, &source.to_string()),
        _ => render_generic(e),
    };
}

fn render_generic(e: &Error) -> String {
    return match e {
        Error::Io(inner) => format!("\
# Error: I/O

{inner}
"),
        Error::TomlDe(inner) => format!("\
# Error: Invalid TOML

{inner}

## Fix

Check `{}` against the documented keys:
`api_url`, `jobs`, `package_pattern`, `site`, `trim_namespaces`.
", config::FILE_NAME),
        Error::Network { reason, url } => format!("\
# Error: Network

Request to `{url}` failed: {reason}
"),
        _ => format!("\
# Error

{e}
"),
    };
}

fn render_api_url_template(url: &str) -> String {
    return format!("\
# Error: Missing Version Tag

The api url `{url}` contains a `{{0}}` placeholder that is filled from the
version tag, but no tag was given.

## Fix

Pass the editor or package version:

    xrefmaps fix xrefmap.yml --tag 6000.0.1f1
");
}

fn render_config_not_found(path: &Path) -> String {
    return format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Point `--config` at an existing file, or drop the flag to use `{}`
from the working directory.
", path.display(), config::FILE_NAME);
}

fn render_invalid_api_url(url: &str, reason: &str) -> String {
    return format!("\
# Error: Invalid API URL

`{url}` {reason}.

## Fix

Use an absolute documentation root that ends with `/`, e.g.

    https://docs.unity3d.com/Packages/com.unity.inputsystem@{{0}}/api/
");
}

fn render_invalid_pattern(reason: &str) -> String {
    return format!("\
# Error: Invalid Pattern

`package_pattern` is not a valid regular expression:

{reason}
");
}

fn render_map_not_found(path: &Path) -> String {
    return format!("\
# Error: Xref Map Not Found

`{}` does not exist.
", path.display());
}

fn render_unrecognized_version(tag: &str) -> String {
    return format!("\
# Error: Unrecognized Version

`{tag}` has no `major.minor.patch` triple to build the short version from.

## Fix

Pass a full version such as `6000.0.1f1` or `1.17.0`.
");
}

fn render_yaml_de(path: &Path, reason: &str) -> String {
    return format!("\
# Error: Invalid Xref Map

Could not parse `{}`: {reason}
", path.display());
}
