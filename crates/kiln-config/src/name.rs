//! Global name derivation for universal-module bundles.
//!
//! The UMD bundle exposes its exports under a global whose name is derived from
//! the package name:
//!
//! 1. strip an optional `@scope/` segment and an optional `svelte-` prefix
//! 2. upper-case the first character
//! 3. turn every remaining `-x` into `X`
//!
//! Names that do not have the expected shape are not rejected; whatever the
//! three steps produce is returned unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(@\S+/)?(svelte-)?(\S+)").expect("prefix pattern is valid"));

// `\w` is spelled out so word characters stay ASCII-only.
static LEADING_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]").expect("leading pattern is valid"));

static HYPHEN_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[A-Za-z0-9_]").expect("hyphen pattern is valid"));

/// Derive the UMD global identifier from a package name.
///
/// # Example
///
/// ```
/// use kiln_config::derive_bundle_name;
///
/// assert_eq!(derive_bundle_name("svelte-foo"), "Foo");
/// assert_eq!(derive_bundle_name("@my-org/svelte-foo-bar"), "FooBar");
/// assert_eq!(derive_bundle_name("widget"), "Widget");
/// ```
pub fn derive_bundle_name(package_name: &str) -> String {
    let stripped = PREFIX.replace(package_name, "$3");

    let capitalized =
        LEADING_WORD_CHAR.replace(&stripped, |caps: &Captures| caps[0].to_ascii_uppercase());

    HYPHEN_WORD_CHAR
        .replace_all(&capitalized, |caps: &Captures| caps[0][1..].to_ascii_uppercase())
        .into_owned()
}
