/// Core domain types: symbol kinds and documentation site layouts.
use std::fmt;

/// Documentation site layout that hrefs are rewritten for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMode {
    /// Versioned scripting reference: one page per type or member, no fragments.
    Editor,
    /// Per-package API site: one page per type, members addressed by fragment.
    Package,
}

impl fmt::Display for SiteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            SiteMode::Editor => f.write_str("editor"),
            SiteMode::Package => f.write_str("package"),
        };
    }
}

/// The kind prefix of a comment id (`T` in `T:UnityEngine.GameObject`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// `E:` events.
    Event,
    /// `F:` fields and enum members.
    Field,
    /// `M:` methods, constructors, and operators.
    Method,
    /// `N:` namespaces.
    Namespace,
    /// Any prefix the generator emits that has no dedicated rule.
    Other(String),
    /// `Overload:` grouping entries. Never resolved, never written back.
    Overload,
    /// `P:` properties and indexers.
    Property,
    /// `T:` classes, structs, interfaces, enums, and delegates.
    Type,
}

impl SymbolKind {
    /// Map a raw comment id prefix onto a kind.
    pub fn from_prefix(prefix: &str) -> Self {
        return match prefix {
            "E" => SymbolKind::Event,
            "F" => SymbolKind::Field,
            "M" => SymbolKind::Method,
            "N" => SymbolKind::Namespace,
            "Overload" => SymbolKind::Overload,
            "P" => SymbolKind::Property,
            "T" => SymbolKind::Type,
            other => SymbolKind::Other(other.to_string()),
        };
    }

    /// Members whose trailing lowercase segment becomes a `-member` page name on the editor site.
    pub const fn is_member(&self) -> bool {
        return matches!(self, SymbolKind::Field | SymbolKind::Method | SymbolKind::Property);
    }
}
