use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Error;
use crate::pipeline::RewriteSettings;
use crate::pool;
use crate::types::SiteMode;
use crate::version;

/// Default config file looked up in the working directory.
pub const FILE_NAME: &str = ".xrefmaps.toml";

/// Scripting reference root; `{0}` is the editor's `major.minor`.
pub const DEFAULT_API_URL: &str = "https://docs.unity3d.com/{0}/Documentation/ScriptReference/";

/// Api urls matching this are package API sites.
pub const DEFAULT_PACKAGE_PATTERN: &str = "https://docs.unity3d.com/Packages/";

/// How to pick the site layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteSetting {
    /// Package layout if the api url matches `package_pattern`, editor otherwise.
    #[default]
    Auto,
    /// Always the editor scripting reference layout.
    Editor,
    /// Always the package API layout.
    Package,
}

/// Project configuration loaded from `.xrefmaps.toml`, then overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Api url template, possibly containing `{0}`.
    pub api_url: String,
    /// Worker threads; 0 means one per core.
    pub jobs: usize,
    /// Regex deciding whether an api url is a package site.
    pub package_pattern: String,
    /// Site layout selection.
    pub site: SiteSetting,
    /// Namespaces trimmed from editor-site page names.
    pub trim_namespaces: Vec<String>,
}

/// Raw TOML structure for `.xrefmaps.toml`. Every key is optional.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct XrefmapsTomlConfig {
    /// See [`Config::api_url`].
    api_url: Option<String>,
    /// See [`Config::jobs`].
    jobs: Option<usize>,
    /// See [`Config::package_pattern`].
    package_pattern: Option<String>,
    /// See [`Config::site`].
    site: Option<SiteSetting>,
    /// See [`Config::trim_namespaces`].
    #[serde(default)]
    trim_namespaces: Vec<String>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--jobs`
    pub jobs: Option<usize>,
    /// `--package-pattern`
    pub package_pattern: Option<String>,
    /// `--site`
    pub site: Option<SiteSetting>,
    /// `--trim-namespace`, replaces the configured list when non-empty.
    pub trim_namespaces: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            api_url: DEFAULT_API_URL.to_string(),
            jobs: 1,
            package_pattern: DEFAULT_PACKAGE_PATTERN.to_string(),
            site: SiteSetting::Auto,
            trim_namespaces: Vec::new(),
        };
    }
}

impl Config {
    /// Load config from `.xrefmaps.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist, but never falls back
    /// silently when the file exists and is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(FILE_NAME);
        return match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Io(e)),
        };
    }

    /// Load config from an explicitly named file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file is missing,
    /// `Error::Io` for other read failures, or `Error::TomlDe` if malformed.
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        return match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::ConfigNotFound { path: PathBuf::from(path) })
            },
            Err(e) => Err(Error::Io(e)),
        };
    }

    /// Parse config TOML, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: XrefmapsTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            api_url: raw.api_url.unwrap_or(defaults.api_url),
            jobs: raw.jobs.unwrap_or(defaults.jobs),
            package_pattern: raw.package_pattern.unwrap_or(defaults.package_pattern),
            site: raw.site.unwrap_or(defaults.site),
            trim_namespaces: raw.trim_namespaces,
        });
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(jobs) = overrides.jobs {
            self.jobs = jobs;
        }
        if let Some(package_pattern) = overrides.package_pattern {
            self.package_pattern = package_pattern;
        }
        if let Some(site) = overrides.site {
            self.site = site;
        }
        if !overrides.trim_namespaces.is_empty() {
            self.trim_namespaces = overrides.trim_namespaces;
        }
        return self;
    }

    /// Worker count with 0 expanded to the available cores.
    pub fn jobs(&self) -> NonZeroUsize {
        return pool::jobs_or_available(self.jobs);
    }

    /// Turn this config into concrete settings for one map.
    ///
    /// # Errors
    ///
    /// Returns errors from api url formatting, or `Error::InvalidPattern`
    /// if `package_pattern` is needed and does not compile.
    pub fn rewrite_settings(&self, tag: Option<&str>) -> Result<RewriteSettings, Error> {
        let api_url = version::format_api_url(&self.api_url, tag)?;
        let site = self.site_mode(&api_url)?;

        return Ok(RewriteSettings {
            api_url,
            jobs: self.jobs(),
            namespaces_to_trim: self.normalized_trim_namespaces(),
            site,
        });
    }

    /// Resolve `auto` against the final api url.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if `package_pattern` does not compile.
    pub fn site_mode(&self, api_url: &str) -> Result<SiteMode, Error> {
        return match self.site {
            SiteSetting::Editor => Ok(SiteMode::Editor),
            SiteSetting::Package => Ok(SiteMode::Package),
            SiteSetting::Auto => {
                let pattern = Regex::new(&self.package_pattern)?;
                if pattern.is_match(api_url) {
                    Ok(SiteMode::Package)
                } else {
                    Ok(SiteMode::Editor)
                }
            },
        };
    }

    /// Trim entries without surrounding whitespace; blank entries are discarded
    /// since an empty namespace would strip every `.` from page names.
    fn normalized_trim_namespaces(&self) -> Vec<String> {
        return self
            .trim_namespaces
            .iter()
            .map(|ns| return ns.trim())
            .filter(|ns| return !ns.is_empty())
            .map(str::to_string)
            .collect();
    }
}
