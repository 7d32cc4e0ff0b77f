//! Existence checks for rewritten hrefs.

use std::num::NonZeroUsize;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;

use crate::error::Error;
use crate::pool;
use crate::xrefmap::XrefMapReference;

/// Per-request timeout for link probes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// What a probe learned about a url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// 2xx response.
    Reachable(u16),
    /// 404 response.
    NotFound,
    /// Anything else the server answered with.
    Unexpected(u16),
}

/// Something that can tell whether a url exists.
pub trait LinkProbe {
    /// Probe one url.
    ///
    /// # Errors
    ///
    /// Returns `Error::Network` if the request could not be completed.
    fn probe(&self, url: &str) -> Result<ProbeStatus, Error>;
}

/// HEAD requests over a shared blocking client.
pub struct HttpProbe {
    /// Pooled client reused across probes.
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Build a client with the probe timeout and a crate user agent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Network` if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("xrefmaps/", env!("CARGO_PKG_VERSION")))
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| {
                return Error::Network {
                    reason: e.to_string(),
                    url: String::new(),
                };
            })?;
        return Ok(Self { client });
    }
}

impl LinkProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<ProbeStatus, Error> {
        let response = self.client.head(url).send().map_err(|e| {
            return Error::Network {
                reason: e.to_string(),
                url: url.to_string(),
            };
        })?;
        return Ok(classify(response.status()));
    }
}

/// Map an HTTP status onto a probe outcome.
fn classify(status: StatusCode) -> ProbeStatus {
    if status.is_success() {
        return ProbeStatus::Reachable(status.as_u16());
    }
    if status == StatusCode::NOT_FOUND {
        return ProbeStatus::NotFound;
    }
    return ProbeStatus::Unexpected(status.as_u16());
}

/// Outcome of checking one record's href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The record carries no href at all.
    MissingHref,
    /// The request failed before a status arrived.
    NetworkError {
        /// Transport error description.
        reason: String,
    },
    /// 404.
    NotFound,
    /// 2xx.
    Reachable {
        /// HTTP status code.
        status: u16,
    },
    /// Neither 2xx nor 404.
    Unexpected {
        /// HTTP status code.
        status: u16,
    },
}

/// One checked record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    /// The href that was probed, if any.
    pub href: Option<String>,
    /// What the probe found.
    #[serde(flatten)]
    pub outcome: LinkOutcome,
    /// Uid of the record.
    pub uid: String,
}

impl LinkResult {
    /// Only a 2xx answer counts as a valid link.
    pub const fn is_reachable(&self) -> bool {
        return matches!(self.outcome, LinkOutcome::Reachable { .. });
    }
}

/// Summary written by `test --format json`.
#[derive(Debug, Serialize)]
pub struct LinkReport<'a> {
    /// Number of records checked.
    pub checked: usize,
    /// Records whose href is not reachable, in map order.
    pub unreachable: Vec<&'a LinkResult>,
}

impl<'a> LinkReport<'a> {
    /// Collect the unreachable results.
    pub fn new(results: &'a [LinkResult]) -> Self {
        return Self {
            checked: results.len(),
            unreachable: results.iter().filter(|r| return !r.is_reachable()).collect(),
        };
    }
}

/// Probe every record's href on up to `jobs` threads. Results follow input order.
///
/// Unexpected statuses and transport failures are logged at error level;
/// a plain 404 is left to the caller to report.
pub fn check_links<P>(references: &[XrefMapReference], probe: &P, jobs: NonZeroUsize) -> Vec<LinkResult>
where
    P: LinkProbe + Sync,
{
    let items: Vec<&XrefMapReference> = references.iter().collect();
    return pool::map_ordered(items, jobs, |reference| return check_one(reference, probe));
}

/// Probe one record.
fn check_one<P: LinkProbe>(reference: &XrefMapReference, probe: &P) -> LinkResult {
    let uid = reference.uid_or_empty().to_string();
    let Some(href) = reference.href.clone() else {
        return LinkResult {
            href: None,
            outcome: LinkOutcome::MissingHref,
            uid,
        };
    };

    let outcome = match probe.probe(&href) {
        Ok(ProbeStatus::Reachable(status)) => LinkOutcome::Reachable { status },
        Ok(ProbeStatus::NotFound) => LinkOutcome::NotFound,
        Ok(ProbeStatus::Unexpected(status)) => {
            tracing::error!(%uid, %href, status, "unexpected status");
            LinkOutcome::Unexpected { status }
        },
        Err(e) => {
            tracing::error!(%uid, %href, error = %e, "probe failed");
            LinkOutcome::NetworkError { reason: e.to_string() }
        },
    };

    return LinkResult {
        href: Some(href),
        outcome,
        uid,
    };
}
