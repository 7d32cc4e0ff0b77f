//! Comment id parsing: `M:Namespace.Type.Method(Arg)` into kind and uid.

use crate::error::Error;
use crate::types::SymbolKind;

/// A comment id split into its kind prefix and the encoded uid that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentId<'a> {
    /// Symbol kind from the prefix.
    pub kind: SymbolKind,
    /// Everything after the first `:`, including any encoded signature.
    pub uid: &'a str,
}

/// Split a comment id on its first `:`.
///
/// The uid half is not validated here; a malformed uid only surfaces later
/// when resolution cannot find the pieces it expects.
///
/// # Errors
///
/// Returns `Error::MalformedIdentifier` if `comment_id` has no `:`.
pub fn parse<'a>(comment_id: &'a str, record_uid: &str) -> Result<CommentId<'a>, Error> {
    let Some((prefix, uid)) = comment_id.split_once(':') else {
        return Err(Error::MalformedIdentifier {
            comment_id: comment_id.to_string(),
            uid: record_uid.to_string(),
        });
    };

    return Ok(CommentId {
        kind: SymbolKind::from_prefix(prefix),
        uid,
    });
}
