//! Xref map persistence: parsing, serialization, and the per-record model.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identifier::{self, CommentId};
use crate::types::SymbolKind;

/// First line of every written map. DocFX sniffs it to pick the document type.
pub const HEADER: &str = "### YamlMime:XRefMap";

/// Conventional file name of a generated map.
pub const FILE_NAME: &str = "xrefmap.yml";

/// Bare `<digit>:` tokens emitted by the generator inside plain scalars.
#[allow(clippy::expect_used, reason = "hardcoded pattern, compile-time invariant")]
static DIGIT_COLON: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"(\d):").expect("valid regex");
});

/// One documented symbol. Only `uid`, `name`, `commentId`, and `href` take part
/// in resolution; every other key is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XrefMapReference {
    /// Globally unique symbol path, e.g. `UnityEngine.GameObject`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Short display name, e.g. `AddDevice<TDevice>(string)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short display name, VB syntax.
    #[serde(rename = "name.vb", skip_serializing_if = "Option::is_none")]
    pub name_vb: Option<String>,
    /// Link to the symbol's documentation page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Symbol kind and encoded uid, e.g. `M:UnityEngine.Object.Destroy(UnityEngine.Object)`.
    #[serde(rename = "commentId", skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    /// Generator flag for specialised generic references.
    #[serde(rename = "isSpec", skip_serializing_if = "Option::is_none")]
    pub is_spec: Option<String>,
    /// Fully qualified name.
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Fully qualified name, VB syntax.
    #[serde(rename = "fullName.vb", skip_serializing_if = "Option::is_none")]
    pub full_name_vb: Option<String>,
    /// Display name qualified by the declaring type.
    #[serde(rename = "nameWithType", skip_serializing_if = "Option::is_none")]
    pub name_with_type: Option<String>,
    /// Display name qualified by the declaring type, VB syntax.
    #[serde(rename = "nameWithType.vb", skip_serializing_if = "Option::is_none")]
    pub name_with_type_vb: Option<String>,
    /// Keys with no dedicated field, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl XrefMapReference {
    /// Parse this record's comment id.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedIdentifier` if the comment id is missing or has no `:`.
    pub fn comment_id(&self) -> Result<CommentId<'_>, Error> {
        let Some(raw) = self.comment_id.as_deref() else {
            return Err(Error::MalformedIdentifier {
                comment_id: String::new(),
                uid: self.uid_or_empty().to_string(),
            });
        };
        return identifier::parse(raw, self.uid_or_empty());
    }

    /// Overload groupings have no page of their own and must not be written back.
    pub fn is_overload(&self) -> bool {
        return self
            .comment_id()
            .is_ok_and(|id| return id.kind == SymbolKind::Overload);
    }

    /// The record uid, or `""` when the generator left it out.
    pub fn uid_or_empty(&self) -> &str {
        return self.uid.as_deref().unwrap_or_default();
    }
}

/// A whole xref map document. Reference order is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XrefMap {
    /// Whether the generator sorted `references` by uid. Passed through as-is.
    #[serde(default)]
    pub sorted: bool,
    /// Symbol records in document order.
    #[serde(default)]
    pub references: Vec<XrefMapReference>,
}

impl XrefMap {
    /// Parse a map from YAML text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `Error::YamlDe` if the normalised text is not a valid map.
    pub fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let normalized = strip_digit_colons(content);
        return serde_yaml::from_str(&normalized).map_err(|source| {
            return Error::YamlDe {
                path: path.to_path_buf(),
                source,
            };
        });
    }

    /// Read and parse a map from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::MapNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures,
    /// or `Error::YamlDe` if the content is not a valid map.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MapNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content, path);
    }

    /// Serialize to YAML, prefixed with the document type header.
    ///
    /// # Errors
    ///
    /// Returns `Error::YamlSer` if serialization fails.
    pub fn serialize(&self) -> Result<String, Error> {
        let body = serde_yaml::to_string(self).map_err(Error::YamlSer)?;
        return Ok(format!("{HEADER}\n{body}"));
    }

    /// Write the map to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::YamlSer` if serialization fails,
    /// or `Error::Io` if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let content = self.serialize()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        return Ok(());
    }
}

/// Turn bare `<digit>:` tokens into `<digit>` so they stop reading as mapping keys.
fn strip_digit_colons(content: &str) -> String {
    return DIGIT_COLON.replace_all(content, "${1}").into_owned();
}
