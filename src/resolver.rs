//! Href resolution: comment id + display name to a public documentation url.
//!
//! Two independent rule sets share nothing but the comment id parser:
//! the editor scripting reference (one page per member, dashed member names)
//! and the package API site (one page per type, members as fragments).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::types::{SiteMode, SymbolKind};
use crate::xrefmap::XrefMapReference;

/// Operator rewrites, applied in order after `.op_` becomes `.operator_`.
/// Anything not listed is passed through unchanged.
const OPERATOR_SUFFIXES: [(&str, &str); 6] = [
    (".operator_Subtraction", ".operator_subtract"),
    (".operator_Multiply", ".operator_multiply"),
    (".operator_Division", ".operator_divide"),
    (".operator_Addition", ".operator_add"),
    (".operator_Equality", ".operator_eq"),
    (".operator_Implicit~", ".operator_"),
];

/// Compile a hardcoded pattern.
#[allow(clippy::expect_used, reason = "hardcoded patterns, compile-time invariant")]
fn pattern(source: &str) -> Regex {
    return Regex::new(source).expect("valid regex");
}

/// Method generic arity, e.g. the ``` ``1 ``` in `GetComponent``1`.
static GENERIC_ARITY: LazyLock<Regex> = LazyLock::new(|| return pattern(r"`{2}\d"));

/// Bare method name: everything before the generic list or parameter list.
static METHOD_NAME: LazyLock<Regex> = LazyLock::new(|| return pattern(r"([^<>]*).*\("));

/// Non-word characters, replaced by `_` in package fragments.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| return pattern(r"\W"));

/// Overload disambiguation, from the first `(` to the last `)`.
static PARAMETER_LIST: LazyLock<Regex> = LazyLock::new(|| return pattern(r"\(.*\)"));

/// A trailing lowercase member segment, which the editor site spells `Type-member`.
static TRAILING_MEMBER: LazyLock<Regex> = LazyLock::new(|| return pattern(r"\.([a-z].*)$"));

/// Pointer return marker at the very end of a uid.
static TRAILING_POINTER: LazyLock<Regex> = LazyLock::new(|| return pattern(r"\*$"));

/// Compute the public documentation url for one reference.
///
/// `api_url` is the site root and must end in `/`. `namespaces_to_trim` only
/// affects the editor site.
///
/// # Errors
///
/// Returns `Error::MalformedIdentifier` if the comment id is missing or has no `:`,
/// `Error::MissingName` if package resolution needs a name the record lacks,
/// or `Error::Resolution` if the owning type cannot be located in the uid.
pub fn resolve(
    api_url: &str,
    reference: &XrefMapReference,
    namespaces_to_trim: &[String],
    site: SiteMode,
) -> Result<String, Error> {
    let id = reference.comment_id()?;

    return match site {
        SiteMode::Editor => Ok(resolve_editor_href(api_url, &id.kind, id.uid, namespaces_to_trim)),
        SiteMode::Package => {
            let Some(name) = reference.name.as_deref() else {
                return Err(Error::MissingName { uid: id.uid.to_string() });
            };
            resolve_package_href(api_url, &id.kind, id.uid, name)
        },
    };
}

/// Build an editor scripting reference url.
///
/// Namespaces have no page of their own and link to the index. Everything
/// else becomes a page name derived from the uid.
pub fn resolve_editor_href(
    api_url: &str,
    kind: &SymbolKind,
    uid: &str,
    namespaces_to_trim: &[String],
) -> String {
    if *kind == SymbolKind::Namespace {
        return format!("{api_url}index.html");
    }

    let mut href = uid.to_string();

    for namespace in namespaces_to_trim {
        href = href.replace(&format!("{namespace}."), "");
    }

    // Constructors
    href = href.replace(".#ctor", "-ctor");

    // Generics
    href = GENERIC_ARITY.replace_all(&href, "").into_owned();
    href = href.replace('`', "_");

    // Overloads share one page.
    href = TRAILING_POINTER.replace_all(&href, "").into_owned();
    href = PARAMETER_LIST.replace_all(&href, "").into_owned();

    if *kind == SymbolKind::Method && uid.contains(".op_") {
        href = rewrite_operator(&href);
    }

    if kind.is_member() {
        href = TRAILING_MEMBER.replace_all(&href, "-${1}").into_owned();
    }

    return format!("{api_url}{href}.html");
}

/// Build a package API site url: the owning type's page plus a member fragment.
///
/// # Errors
///
/// Returns `Error::Resolution` if the member name cannot be found after the
/// owning type inside `uid`.
pub fn resolve_package_href(
    api_url: &str,
    kind: &SymbolKind,
    uid: &str,
    name: &str,
) -> Result<String, Error> {
    let member = match kind {
        SymbolKind::Namespace | SymbolKind::Type => return Ok(format!("{api_url}{uid}.html")),
        SymbolKind::Method => bare_method_name(uid, name)?,
        _ => name,
    };

    let owner = owner_type_name(uid, member)?;
    let fragment = NON_WORD.replace_all(uid, "_");

    return Ok(format!("{api_url}{owner}.html#{fragment}"));
}

/// Extract `AddDevice` from `AddDevice<TDevice>(string)`.
///
/// # Errors
///
/// Returns `Error::Resolution` if `name` has no parameter list or an empty method name.
fn bare_method_name<'a>(uid: &str, name: &'a str) -> Result<&'a str, Error> {
    let method = METHOD_NAME
        .captures(name)
        .and_then(|cap| return cap.get(1))
        .map(|m| return m.as_str())
        .unwrap_or_default();

    if method.is_empty() {
        return Err(Error::Resolution {
            reason: format!("no method name in `{name}`"),
            uid: uid.to_string(),
        });
    }

    return Ok(method);
}

/// Everything in `uid` before the separator that precedes the first occurrence of `member`.
///
/// # Errors
///
/// Returns `Error::Resolution` if `member` is absent from `uid` or starts it.
fn owner_type_name<'a>(uid: &'a str, member: &str) -> Result<&'a str, Error> {
    let owner = uid
        .find(member)
        .and_then(|index| return index.checked_sub(1))
        .and_then(|end| return uid.get(..end));

    return owner.ok_or_else(|| {
        return Error::Resolution {
            reason: format!("`{member}` not found after an owning type"),
            uid: uid.to_string(),
        };
    });
}

/// Map C# operator method names onto the editor site's operator page names.
fn rewrite_operator(href: &str) -> String {
    let mut rewritten = href.replace(".op_", ".operator_");
    for (raw, page) in OPERATOR_SUFFIXES {
        rewritten = rewritten.replace(raw, page);
    }
    return rewritten;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR: &str = "https://docs.unity3d.com/6000.0/Documentation/ScriptReference/";
    const PACKAGE: &str = "https://docs.unity3d.com/Packages/com.unity.inputsystem@1.17/api/";

    fn reference(name: &str, comment_id: &str) -> XrefMapReference {
        return XrefMapReference {
            comment_id: Some(comment_id.to_string()),
            name: Some(name.to_string()),
            ..XrefMapReference::default()
        };
    }

    fn trim_unity() -> Vec<String> {
        return vec!["UnityEngine".to_string(), "UnityEditor".to_string()];
    }

    fn editor(comment_id: &str) -> String {
        return resolve(EDITOR, &reference("", comment_id), &trim_unity(), SiteMode::Editor).unwrap();
    }

    fn package(name: &str, comment_id: &str) -> String {
        return resolve(PACKAGE, &reference(name, comment_id), &[], SiteMode::Package).unwrap();
    }

    // ── Editor site ────────────────────────────────────────────────────

    #[test]
    fn editor_namespace_links_to_index() {
        let href = resolve(EDITOR, &reference("UnityEngine", "N:UnityEngine"), &[], SiteMode::Editor);
        assert_eq!(href.unwrap(), format!("{EDITOR}index.html"));
    }

    #[test]
    fn editor_type_drops_trimmed_namespace() {
        assert_eq!(editor("T:UnityEngine.GameObject"), format!("{EDITOR}GameObject.html"));
    }

    #[test]
    fn editor_type_without_trimming_keeps_namespace() {
        let href = resolve(EDITOR, &reference("GameObject", "T:UnityEngine.GameObject"), &[], SiteMode::Editor);
        assert_eq!(href.unwrap(), format!("{EDITOR}UnityEngine.GameObject.html"));
    }

    #[test]
    fn editor_trim_order_does_not_matter() {
        let reversed = vec!["UnityEditor".to_string(), "UnityEngine".to_string()];
        let href = resolve(EDITOR, &reference("", "T:UnityEditor.EditorWindow"), &reversed, SiteMode::Editor);
        assert_eq!(href.unwrap(), editor("T:UnityEditor.EditorWindow"));
        assert_eq!(editor("T:UnityEditor.EditorWindow"), format!("{EDITOR}EditorWindow.html"));
    }

    #[test]
    fn editor_nested_namespace_keeps_remainder() {
        assert_eq!(editor("T:UnityEngine.UI.Button"), format!("{EDITOR}UI.Button.html"));
    }

    #[test]
    fn editor_constructor() {
        assert_eq!(
            editor("M:UnityEngine.GameObject.#ctor(System.String)"),
            format!("{EDITOR}GameObject-ctor.html")
        );
    }

    #[test]
    fn editor_lowercase_property_becomes_dashed() {
        assert_eq!(
            editor("P:UnityEngine.GameObject.transform"),
            format!("{EDITOR}GameObject-transform.html")
        );
    }

    #[test]
    fn editor_lowercase_field_becomes_dashed() {
        assert_eq!(editor("F:UnityEngine.Vector3.x"), format!("{EDITOR}Vector3-x.html"));
    }

    #[test]
    fn editor_pascal_case_method_stays_a_page() {
        assert_eq!(
            editor("M:UnityEngine.GameObject.SetActive(System.Boolean)"),
            format!("{EDITOR}GameObject.SetActive.html")
        );
    }

    #[test]
    fn editor_generic_method_drops_arity() {
        assert_eq!(
            editor("M:UnityEngine.GameObject.GetComponent``1"),
            format!("{EDITOR}GameObject.GetComponent.html")
        );
    }

    #[test]
    fn editor_generic_type_uses_underscore() {
        assert_eq!(
            editor("T:UnityEngine.Events.UnityEvent`1"),
            format!("{EDITOR}Events.UnityEvent_1.html")
        );
    }

    #[test]
    fn editor_nested_parameter_list_is_removed() {
        assert_eq!(
            editor("M:UnityEngine.Mesh.GetVertices(System.Collections.Generic.List{UnityEngine.Vector3})"),
            format!("{EDITOR}Mesh.GetVertices.html")
        );
    }

    #[test]
    fn editor_trailing_pointer_is_removed() {
        assert_eq!(
            editor("M:UnityEngine.Mesh.GetNativeVertexBufferPtr*"),
            format!("{EDITOR}Mesh.GetNativeVertexBufferPtr.html")
        );
    }

    #[test]
    fn editor_mapped_operators() {
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Addition(UnityEngine.Vector3,UnityEngine.Vector3)"),
            format!("{EDITOR}Vector3-operator_add.html")
        );
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Subtraction(UnityEngine.Vector3,UnityEngine.Vector3)"),
            format!("{EDITOR}Vector3-operator_subtract.html")
        );
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Multiply(UnityEngine.Vector3,System.Single)"),
            format!("{EDITOR}Vector3-operator_multiply.html")
        );
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Division(UnityEngine.Vector3,System.Single)"),
            format!("{EDITOR}Vector3-operator_divide.html")
        );
        assert_eq!(
            editor("M:UnityEngine.Object.op_Equality(UnityEngine.Object,UnityEngine.Object)"),
            format!("{EDITOR}Object-operator_eq.html")
        );
    }

    #[test]
    fn editor_implicit_conversion_uses_target_type() {
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Implicit(UnityEngine.Vector2)~UnityEngine.Vector3"),
            format!("{EDITOR}Vector3-operator_Vector3.html")
        );
    }

    #[test]
    fn editor_unmapped_operator_passes_through() {
        assert_eq!(
            editor("M:UnityEngine.Vector3.op_Inequality(UnityEngine.Vector3,UnityEngine.Vector3)"),
            format!("{EDITOR}Vector3-operator_Inequality.html")
        );
    }

    #[test]
    fn editor_op_rewrite_only_applies_to_methods() {
        assert_eq!(editor("F:UnityEngine.Foo.op_Thing"), format!("{EDITOR}Foo-op_Thing.html"));
    }

    #[test]
    fn editor_events_are_not_dashed() {
        assert_eq!(
            editor("E:UnityEngine.Application.logMessageReceived"),
            format!("{EDITOR}Application.logMessageReceived.html")
        );
    }

    #[test]
    fn editor_ignores_missing_name() {
        let bare = XrefMapReference {
            comment_id: Some("T:UnityEngine.GameObject".to_string()),
            ..XrefMapReference::default()
        };
        let href = resolve(EDITOR, &bare, &trim_unity(), SiteMode::Editor).unwrap();
        assert_eq!(href, format!("{EDITOR}GameObject.html"));
    }

    // ── Package site ───────────────────────────────────────────────────

    #[test]
    fn package_namespace_has_no_fragment() {
        assert_eq!(
            package("UnityEngine.InputSystem", "N:UnityEngine.InputSystem"),
            format!("{PACKAGE}UnityEngine.InputSystem.html")
        );
    }

    #[test]
    fn package_type_has_no_fragment() {
        assert_eq!(
            package("InputSystem", "T:UnityEngine.InputSystem.InputSystem"),
            format!("{PACKAGE}UnityEngine.InputSystem.InputSystem.html")
        );
    }

    #[test]
    fn package_type_ignores_trim_list() {
        let href = resolve(
            PACKAGE,
            &reference("InputSystem", "T:UnityEngine.InputSystem.InputSystem"),
            &trim_unity(),
            SiteMode::Package,
        );
        assert_eq!(href.unwrap(), format!("{PACKAGE}UnityEngine.InputSystem.InputSystem.html"));
    }

    #[test]
    fn package_method_without_parameters() {
        assert_eq!(
            package("Enable()", "M:UnityEngine.InputSystem.InputActionAsset.Enable"),
            format!(
                "{PACKAGE}UnityEngine.InputSystem.InputActionAsset.html#UnityEngine_InputSystem_InputActionAsset_Enable"
            )
        );
    }

    #[test]
    fn package_method_with_parameter() {
        assert_eq!(
            package(
                "Contains(InputAction)",
                "M:UnityEngine.InputSystem.InputActionAsset.Contains(UnityEngine.InputSystem.InputAction)"
            ),
            format!(
                "{PACKAGE}UnityEngine.InputSystem.InputActionAsset.html#UnityEngine_InputSystem_InputActionAsset_Contains_UnityEngine_InputSystem_InputAction_"
            )
        );
    }

    #[test]
    fn package_method_with_out_parameter() {
        assert_eq!(
            package(
                "FindBinding(InputBinding, out InputAction)",
                "M:UnityEngine.InputSystem.InputActionAsset.FindBinding(UnityEngine.InputSystem.InputBinding,UnityEngine.InputSystem.InputAction@)"
            ),
            format!(
                "{PACKAGE}UnityEngine.InputSystem.InputActionAsset.html#UnityEngine_InputSystem_InputActionAsset_FindBinding_UnityEngine_InputSystem_InputBinding_UnityEngine_InputSystem_InputAction__"
            )
        );
    }

    #[test]
    fn package_generic_method() {
        assert_eq!(
            package("AddDevice<TDevice>(string)", "M:UnityEngine.InputSystem.InputSystem.AddDevice``1(System.String)"),
            format!(
                "{PACKAGE}UnityEngine.InputSystem.InputSystem.html#UnityEngine_InputSystem_InputSystem_AddDevice__1_System_String_"
            )
        );
    }

    #[test]
    fn package_property() {
        assert_eq!(
            package("remoting", "P:UnityEngine.InputSystem.InputSystem.remoting"),
            format!("{PACKAGE}UnityEngine.InputSystem.InputSystem.html#UnityEngine_InputSystem_InputSystem_remoting")
        );
    }

    #[test]
    fn package_member_has_exactly_one_fragment() {
        let href = package("settings", "F:UnityEngine.InputSystem.InputSystem.settings");
        assert_eq!(href.matches('#').count(), 1);
        assert!(href.ends_with("#UnityEngine_InputSystem_InputSystem_settings"));
    }

    #[test]
    fn package_method_without_parameter_list_fails() {
        let err = resolve(
            PACKAGE,
            &reference("Enable", "M:UnityEngine.InputSystem.InputActionAsset.Enable"),
            &[],
            SiteMode::Package,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution { ref uid, .. } if uid == "UnityEngine.InputSystem.InputActionAsset.Enable"
        ));
    }

    #[test]
    fn package_member_missing_from_uid_fails() {
        let err = resolve(
            PACKAGE,
            &reference("Remoting", "P:UnityEngine.InputSystem.InputSystem.remoting"),
            &[],
            SiteMode::Package,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn package_member_without_owner_fails() {
        let err = resolve(PACKAGE, &reference("remoting", "P:remoting"), &[], SiteMode::Package).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn package_requires_name() {
        let bare = XrefMapReference {
            comment_id: Some("P:UnityEngine.InputSystem.InputSystem.remoting".to_string()),
            ..XrefMapReference::default()
        };
        let err = resolve(PACKAGE, &bare, &[], SiteMode::Package).unwrap_err();
        assert!(matches!(err, Error::MissingName { .. }));
    }

    // ── Shared ─────────────────────────────────────────────────────────

    #[test]
    fn malformed_comment_id_fails_in_both_modes() {
        let broken = reference("GameObject", "UnityEngine.GameObject");
        for site in [SiteMode::Editor, SiteMode::Package] {
            let err = resolve(EDITOR, &broken, &[], site).unwrap_err();
            assert!(matches!(err, Error::MalformedIdentifier { .. }));
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let method = reference("Contains(InputAction)", "M:UnityEngine.InputSystem.InputActionAsset.Contains(UnityEngine.InputSystem.InputAction)");
        for site in [SiteMode::Editor, SiteMode::Package] {
            let first = resolve(PACKAGE, &method, &trim_unity(), site).unwrap();
            let second = resolve(PACKAGE, &method, &trim_unity(), site).unwrap();
            assert_eq!(first, second);
        }
    }
}
