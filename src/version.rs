//! Version tags and api url templates.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Placeholder replaced by the short version in api url templates.
pub const PLACEHOLDER: &str = "{0}";

/// `major.minor.patch` anywhere in a tag such as `6000.0.1f1` or `v1.17.0`.
#[allow(clippy::expect_used, reason = "hardcoded pattern, compile-time invariant")]
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)").expect("valid regex");
});

/// `6000.0.1f1` becomes `6000.0`; `1.17.0` becomes `1.17`.
///
/// # Errors
///
/// Returns `Error::UnrecognizedVersion` if the tag has no `major.minor.patch` triple.
pub fn short_version(tag: &str) -> Result<String, Error> {
    let Some(caps) = VERSION.captures(tag) else {
        return Err(Error::UnrecognizedVersion { tag: tag.to_string() });
    };
    let major = caps.name("major").map_or("", |m| return m.as_str());
    let minor = caps.name("minor").map_or("", |m| return m.as_str());
    return Ok(format!("{major}.{minor}"));
}

/// Fill the `{0}` placeholder of an api url template and check the result
/// can serve as a link prefix.
///
/// # Errors
///
/// Returns `Error::ApiUrlTemplate` if the template needs a tag and none was given,
/// `Error::UnrecognizedVersion` for an unparseable tag,
/// or `Error::InvalidApiUrl` if the result is not an absolute url ending in `/`.
pub fn format_api_url(template: &str, tag: Option<&str>) -> Result<String, Error> {
    let url = if template.contains(PLACEHOLDER) {
        let Some(tag) = tag else {
            return Err(Error::ApiUrlTemplate { url: template.to_string() });
        };
        template.replace(PLACEHOLDER, &short_version(tag)?)
    } else {
        template.to_string()
    };

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::InvalidApiUrl {
            reason: "must be an absolute http(s) url",
            url,
        });
    }
    if !url.ends_with('/') {
        return Err(Error::InvalidApiUrl {
            reason: "must end with `/`",
            url,
        });
    }

    return Ok(url);
}
