//! The individual keep/remove rules, in evaluation order.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::{Reason, Verdict};
use crate::manifest::DeclaredAsset;
use crate::ports::SearchOracle;

/// Directories whose contents are always treated as used.
pub const EXEMPT_PREFIXES: [&str; 4] =
    ["images/win/", "images/files/", "images/files_v2/", "images/sync/"];

/// Marker for cursor images that are only referenced from generated code.
pub const EXEMPT_SUBSTRING: &str = "caret-";

/// High-DPI variants are loaded implicitly alongside their base image.
pub const EXEMPT_SUFFIX: &str = "@2x.png";

/// A single step of the reference check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Path lies under one of [`EXEMPT_PREFIXES`].
    DirectoryExemption,
    /// Path contains [`EXEMPT_SUBSTRING`].
    SubstringExemption,
    /// Source tree contains the `:/` resource URL.
    LiteralReference,
    /// Path ends with [`EXEMPT_SUFFIX`].
    HighDpiExemption,
    /// Last resort: look for the bare file name. Always decides.
    BasenameFallback,
}

/// Every rule in the order it is evaluated.
pub const RULES: [Rule; 5] = [
    Rule::DirectoryExemption,
    Rule::SubstringExemption,
    Rule::LiteralReference,
    Rule::HighDpiExemption,
    Rule::BasenameFallback,
];

/// Inputs shared by every rule for one asset.
pub struct RuleInput<'a> {
    /// Asset under test.
    pub asset: &'a DeclaredAsset,
    /// Resolve ambiguous basename hits toward removal.
    pub force: bool,
    /// Search backend.
    pub oracle: &'a dyn SearchOracle,
    /// Directory the searches run in.
    pub search_root: &'a Path,
}

impl Rule {
    /// Evaluates the rule, returning a verdict if it decides the asset.
    #[must_use]
    pub fn evaluate(self, input: &RuleInput<'_>) -> Option<(Verdict, Reason)> {
        let path = input.asset.path();
        match self {
            Self::DirectoryExemption => EXEMPT_PREFIXES
                .iter()
                .any(|prefix| path.starts_with(prefix))
                .then_some((Verdict::Keep, Reason::ExemptPrefix)),
            Self::SubstringExemption => path
                .contains(EXEMPT_SUBSTRING)
                .then_some((Verdict::Keep, Reason::ExemptSubstring)),
            Self::LiteralReference => {
                let url = input.asset.resource_url();
                let found = input.oracle.found(&url, input.search_root);
                if !found {
                    debug!(asset = path, needle = %url, "resource reference not found");
                }
                found.then_some((Verdict::Keep, Reason::FoundLiteral))
            }
            Self::HighDpiExemption => {
                path.ends_with(EXEMPT_SUFFIX).then_some((Verdict::Keep, Reason::ExemptSuffix))
            }
            Self::BasenameFallback => {
                let basename = input.asset.basename();
                debug!(asset = path, basename, "falling back to basename search");
                if !input.oracle.found(basename, input.search_root) {
                    debug!(asset = path, basename, "basename not found either");
                    return Some((Verdict::Remove, Reason::NotFound));
                }
                debug!(asset = path, basename, force = input.force, "ambiguous basename match");
                let verdict = if input.force { Verdict::Remove } else { Verdict::Keep };
                Some((verdict, Reason::FoundBasenameAmbiguous))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectoryExemption => "directory-exemption",
            Self::SubstringExemption => "substring-exemption",
            Self::LiteralReference => "literal-reference",
            Self::HighDpiExemption => "high-dpi-exemption",
            Self::BasenameFallback => "basename-fallback",
        };
        f.write_str(name)
    }
}
