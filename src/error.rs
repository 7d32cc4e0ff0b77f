/// Crate-level error types for xrefmaps diagnostics.
use std::path::PathBuf;

/// Every error names the uid, file, or setting that caused it, so a log line
/// or diagnostic is enough to find the offending record without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `--output` was given but the inputs expand to more than one map.
    #[error("--output needs exactly one input map, got {count}")]
    AmbiguousOutput {
        /// Number of maps the inputs expanded to.
        count: usize,
    },

    /// The api url still contains the `{0}` version placeholder but no tag was given.
    #[error("api url `{url}` contains a `{{0}}` placeholder but no version tag was given")]
    ApiUrlTemplate {
        /// The unformatted api url template.
        url: String,
    },

    /// An explicitly requested config file does not exist on disk.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// The api url would produce relative or malformed links.
    #[error("invalid api url `{url}`: {reason}")]
    InvalidApiUrl {
        /// Why the url was rejected.
        reason: &'static str,
        /// The rejected api url.
        url: String,
    },

    /// A user-supplied regular expression does not compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(
        /// The wrapped regex compilation error.
        #[from]
        regex::Error,
    ),

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a link report failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A comment id without the `kind:uid` separator, or a record without one.
    #[error("malformed comment id `{comment_id}` for uid `{uid}`")]
    MalformedIdentifier {
        /// The raw comment id (empty when the record had none).
        comment_id: String,
        /// Uid of the record carrying the comment id.
        uid: String,
    },

    /// An xref map path that does not exist on disk.
    #[error("xref map not found: {}", path.display())]
    MapNotFound {
        /// Path to the missing map.
        path: PathBuf,
    },

    /// A record needs a display name for package-site resolution but has none.
    #[error("missing name for uid `{uid}`")]
    MissingName {
        /// Uid of the record without a name.
        uid: String,
    },

    /// HTTP transport failure while probing a link.
    #[error("network error on {url}: {reason}")]
    Network {
        /// Description of the transport failure.
        reason: String,
        /// The url being probed.
        url: String,
    },

    /// Owner type or method name could not be located inside the uid.
    #[error("cannot resolve href for uid `{uid}`: {reason}")]
    Resolution {
        /// Which extraction step failed.
        reason: String,
        /// Uid that could not be resolved.
        uid: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A version tag without a recognisable `major.minor.patch` triple.
    #[error("unrecognized version tag `{tag}` (expected major.minor.patch)")]
    UnrecognizedVersion {
        /// The rejected tag.
        tag: String,
    },

    /// YAML deserialization of an xref map failed.
    #[error("yaml deserialize: {}: {source}", path.display())]
    YamlDe {
        /// Map file that failed to parse.
        path: PathBuf,
        /// The wrapped YAML error.
        source: serde_yaml::Error,
    },

    /// YAML serialization of an xref map failed.
    #[error("yaml serialize: {0}")]
    YamlSer(
        /// The wrapped YAML error.
        serde_yaml::Error,
    ),
}
