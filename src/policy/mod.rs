//! Reference checking: decides whether a declared asset is still used.
//!
//! The decision is an ordered list of [`Rule`]s walked until one of them
//! produces a verdict. [`Rule::BasenameFallback`] always decides, so every
//! asset gets a verdict.

pub mod rules;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::manifest::DeclaredAsset;
use crate::ports::SearchOracle;

pub use rules::{Rule, RuleInput, RULES};

/// Whether the asset file should stay or go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Referenced or exempt.
    Keep,
    /// Safe to delete.
    Remove,
}

/// Why a verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    /// Under an always-live directory.
    ExemptPrefix,
    /// High-DPI variant of another image.
    ExemptSuffix,
    /// Name contains an always-live marker.
    ExemptSubstring,
    /// The `:/` resource URL occurs in the sources.
    FoundLiteral,
    /// Only the bare file name occurs in the sources.
    FoundBasenameAmbiguous,
    /// No trace of the asset in the sources.
    NotFound,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::ExemptPrefix => "exempt-prefix",
            Self::ExemptSuffix => "exempt-suffix",
            Self::ExemptSubstring => "exempt-substring",
            Self::FoundLiteral => "found-literal",
            Self::FoundBasenameAmbiguous => "found-basename-ambiguous",
            Self::NotFound => "not-found",
        };
        f.write_str(code)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::Remove => "remove",
        })
    }
}

/// Outcome of checking one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Keep or remove.
    pub verdict: Verdict,
    /// Evidence behind the verdict.
    pub reason: Reason,
    /// The rule that decided.
    pub decided_by: Rule,
    /// Rules evaluated, in order, up to and including `decided_by`.
    pub evaluated: Vec<Rule>,
}

impl Classification {
    /// Returns `true` when the asset should be deleted.
    #[must_use]
    pub fn is_remove(&self) -> bool {
        self.verdict == Verdict::Remove
    }
}

/// Classifies one asset by walking [`RULES`] until one decides.
///
/// `force` only matters when the literal reference is missing but the bare
/// file name shows up somewhere: `false` keeps the asset, `true` removes it.
#[must_use]
pub fn classify(
    asset: &DeclaredAsset,
    force: bool,
    oracle: &dyn SearchOracle,
    search_root: &Path,
) -> Classification {
    let input = RuleInput { asset, force, oracle, search_root };
    let mut evaluated = Vec::with_capacity(RULES.len());
    for rule in RULES {
        evaluated.push(rule);
        if let Some((verdict, reason)) = rule.evaluate(&input) {
            return Classification { verdict, reason, decided_by: rule, evaluated };
        }
    }
    // Not reached: the basename fallback always decides.
    Classification {
        verdict: Verdict::Remove,
        reason: Reason::NotFound,
        decided_by: Rule::BasenameFallback,
        evaluated,
    }
}
