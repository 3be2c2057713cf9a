//! Human-readable and JSON renderings of run results.

use crate::driver::{RemovalOutcome, SweepReport};
use crate::manifest::DeclaredAsset;
use crate::policy::Classification;

/// Formats a sweep report for the terminal.
///
/// Removal candidates are always listed; kept assets only when `verbose`.
#[must_use]
pub fn format_report(report: &SweepReport, verbose: bool) -> String {
    let mut lines = Vec::new();
    for entry in &report.entries {
        let c = &entry.classification;
        match &entry.removal {
            Some(outcome) => {
                lines.push(format!("remove  {}  ({})  {}", entry.asset, c.reason, outcome_label(outcome)));
            }
            None if verbose => lines.push(format!("keep    {}  ({})", entry.asset, c.reason)),
            None => {}
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }

    let candidates = report.removal_candidates().count();
    lines.push(format!(
        "{} declared, {} kept, {} to remove",
        report.entries.len(),
        report.kept_count(),
        candidates,
    ));
    if report.policy.dry_run && candidates > 0 {
        lines.push("Dry run: nothing was deleted.".to_string());
    }
    let warnings = report.warning_count();
    if warnings > 0 {
        lines.push(format!("{warnings} file(s) could not be removed; see warnings above."));
    }
    lines.join("\n")
}

fn outcome_label(outcome: &RemovalOutcome) -> String {
    match outcome {
        RemovalOutcome::Planned => "[dry run]".to_string(),
        RemovalOutcome::Removed => "[removed]".to_string(),
        RemovalOutcome::Missing => "[already gone]".to_string(),
        RemovalOutcome::Failed { message, .. } => format!("[failed: {message}]"),
    }
}

/// Serializes a sweep report as pretty JSON.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn format_json(report: &SweepReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("failed to serialize report: {e}"))
}

/// Formats the rule trail of individually checked assets.
#[must_use]
pub fn format_checks(results: &[(DeclaredAsset, Classification)]) -> String {
    let mut lines = Vec::new();
    for (asset, c) in results {
        lines.push(format!("{asset}: {} ({})", c.verdict, c.reason));
        for rule in &c.evaluated {
            let marker = if *rule == c.decided_by { "*" } else { "-" };
            lines.push(format!("  {marker} {rule}"));
        }
    }
    lines.join("\n")
}

/// Formats the declared asset list, one path per line.
#[must_use]
pub fn format_assets(assets: &[DeclaredAsset]) -> String {
    if assets.is_empty() {
        return "No declared assets match the prefix.".to_string();
    }
    let mut lines: Vec<String> = assets.iter().map(ToString::to_string).collect();
    lines.push(String::new());
    lines.push(format!("{} asset(s) declared.", assets.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::config::PolicyConfig;
    use crate::driver::{FailureKind, SweepEntry};
    use crate::policy::{Reason, Rule, Verdict};

    fn entry(path: &str, verdict: Verdict, reason: Reason, removal: Option<RemovalOutcome>) -> SweepEntry {
        SweepEntry {
            asset: DeclaredAsset::new(path),
            classification: Classification {
                verdict,
                reason,
                decided_by: Rule::BasenameFallback,
                evaluated: vec![Rule::DirectoryExemption, Rule::BasenameFallback],
            },
            removal,
        }
    }

    fn report(dry_run: bool) -> SweepReport {
        SweepReport {
            generated_at: Utc::now(),
            policy: PolicyConfig { dry_run, ..PolicyConfig::default() },
            entries: vec![
                entry("images/used.png", Verdict::Keep, Reason::FoundLiteral, None),
                entry(
                    "images/dead.png",
                    Verdict::Remove,
                    Reason::NotFound,
                    Some(if dry_run { RemovalOutcome::Planned } else { RemovalOutcome::Removed }),
                ),
            ],
        }
    }

    #[test]
    fn quiet_report_lists_only_removals() {
        let text = format_report(&report(false), false);
        assert!(text.contains("remove  images/dead.png  (not-found)  [removed]"));
        assert!(!text.contains("images/used.png"));
        assert!(text.contains("2 declared, 1 kept, 1 to remove"));
        assert!(!text.contains("Dry run"));
    }

    #[test]
    fn verbose_report_lists_kept_assets() {
        let text = format_report(&report(true), true);
        assert!(text.contains("keep    images/used.png  (found-literal)"));
        assert!(text.contains("[dry run]"));
        assert!(text.contains("Dry run: nothing was deleted."));
    }

    #[test]
    fn failures_are_counted() {
        let mut r = report(false);
        r.entries[1].removal = Some(RemovalOutcome::Failed {
            kind: FailureKind::PermissionDenied,
            message: "permission denied".into(),
        });
        let text = format_report(&r, false);
        assert!(text.contains("[failed: permission denied]"));
        assert!(text.contains("1 file(s) could not be removed"));
    }

    #[test]
    fn json_report_uses_reason_codes() {
        let json = format_json(&report(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let dead = &value["entries"][1];
        assert_eq!(dead["asset"], "images/dead.png");
        assert_eq!(dead["classification"]["verdict"], "remove");
        assert_eq!(dead["classification"]["reason"], "not-found");
        assert_eq!(dead["removal"]["status"], "planned");
        assert!(value["entries"][0].get("removal").is_none());
        assert_eq!(value["policy"]["dry_run"], true);
    }

    #[test]
    fn check_output_marks_deciding_rule() {
        let e = entry("images/dead.png", Verdict::Remove, Reason::NotFound, None);
        let text = format_checks(&[(e.asset, e.classification)]);
        assert_eq!(
            text,
            "images/dead.png: remove (not-found)\n  - directory-exemption\n  * basename-fallback"
        );
    }

    #[test]
    fn asset_list() {
        assert_eq!(format_assets(&[]), "No declared assets match the prefix.");
        let text = format_assets(&[DeclaredAsset::new("images/a.png")]);
        assert_eq!(text, "images/a.png\n\n1 asset(s) declared.");
    }
}
