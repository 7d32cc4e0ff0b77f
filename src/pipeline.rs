//! Filter-and-rewrite pass over a map's references.

use std::num::NonZeroUsize;

use crate::error::Error;
use crate::pool;
use crate::resolver;
use crate::types::SiteMode;
use crate::xrefmap::XrefMapReference;

/// Everything the rewrite needs besides the references themselves.
#[derive(Debug, Clone)]
pub struct RewriteSettings {
    /// Documentation site root, ending in `/`.
    pub api_url: String,
    /// Worker threads used for resolution.
    pub jobs: NonZeroUsize,
    /// Namespace prefixes removed from editor-site page names.
    pub namespaces_to_trim: Vec<String>,
    /// Which site layout to target.
    pub site: SiteMode,
}

/// A reference that was resolvable in principle but failed, with the reason.
#[derive(Debug)]
pub struct DroppedReference {
    /// Why resolution failed.
    pub error: Error,
    /// Uid of the dropped record (empty if the record had none).
    pub uid: String,
}

/// Outcome of one rewrite pass.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records that failed to resolve, in input order.
    pub dropped: Vec<DroppedReference>,
    /// Number of `Overload:` records filtered out.
    pub overloads: usize,
    /// Resolved records with `href` set, in input order.
    pub references: Vec<XrefMapReference>,
}

/// Drop overload groupings, resolve every other record's href, and drop
/// (with a warning) any record that fails to resolve.
///
/// A failing record never fails the batch. Survivors keep their relative order.
pub fn process(references: Vec<XrefMapReference>, settings: &RewriteSettings) -> BatchReport {
    let total = references.len();
    let (overloads, candidates): (Vec<_>, Vec<_>) =
        references.into_iter().partition(XrefMapReference::is_overload);

    let outcomes = pool::map_ordered(candidates, settings.jobs, |reference| {
        return rewrite_reference(reference, settings);
    });

    let mut report = BatchReport {
        overloads: overloads.len(),
        ..BatchReport::default()
    };

    for outcome in outcomes {
        match outcome {
            Ok(reference) => report.references.push(reference),
            Err(dropped) => {
                tracing::warn!(uid = %dropped.uid, error = %dropped.error, "error fixing href");
                report.dropped.push(dropped);
            },
        }
    }

    tracing::debug!(
        total,
        kept = report.references.len(),
        overloads = report.overloads,
        dropped = report.dropped.len(),
        "rewrite pass finished"
    );

    return report;
}

/// Resolve one record and store the result in its `href`.
///
/// # Errors
///
/// Returns the record's uid together with the resolution error.
fn rewrite_reference(
    mut reference: XrefMapReference,
    settings: &RewriteSettings,
) -> Result<XrefMapReference, DroppedReference> {
    return match resolver::resolve(
        &settings.api_url,
        &reference,
        &settings.namespaces_to_trim,
        settings.site,
    ) {
        Ok(href) => {
            reference.href = Some(href);
            Ok(reference)
        },
        Err(error) => Err(DroppedReference {
            error,
            uid: reference.uid_or_empty().to_string(),
        }),
    };
}
