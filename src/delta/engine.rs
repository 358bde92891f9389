//! Comparison run driver.
//!
//! One run takes a current and a past model and produces a [`DeltaReport`]:
//! the delta tree, the change records that produced it, and the verdict.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DiffSettings;
use crate::error::Result;
use crate::model::{DottedPath, ModelHasher, ModelTree};

use super::builder::{merge_trees, DeltaBuilder};
use super::changes::ChangeSet;
use super::classifier::{SafetyClassifier, Verdict};
use super::comparator::TreeComparator;
use super::walker::walk_changed_key;

/// Engine running comparisons between two models.
#[derive(Debug, Default)]
pub struct DeltaEngine {
    /// Classifier judging the delta.
    classifier: SafetyClassifier,
    /// Hasher for model fingerprints.
    hasher: ModelHasher,
}

/// Result of one comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct DeltaReport {
    /// When the comparison ran.
    pub compared_at: DateTime<Utc>,
    /// Classification of the delta.
    pub verdict: Verdict,
    /// Changed and added values, shaped like the current model.
    pub delta: ModelTree,
    /// Every change recorded during the run.
    pub changes: ChangeSet,
    /// Fingerprint of the current model.
    pub current_fingerprint: String,
    /// Fingerprint of the past model.
    pub past_fingerprint: String,
}

impl DeltaEngine {
    /// Creates an engine with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine using the policy from `settings`.
    #[must_use]
    pub fn from_settings(settings: &DiffSettings) -> Self {
        Self {
            classifier: SafetyClassifier::from_settings(settings),
            hasher: ModelHasher::new(),
        }
    }

    /// Compares `current` against `past`.
    ///
    /// # Errors
    ///
    /// Returns an error only when a recorded path fails to resolve in
    /// `current`, which indicates a defect.
    pub fn compare(&self, current: &ModelTree, past: &ModelTree) -> Result<DeltaReport> {
        let current_fingerprint = self.hasher.fingerprint(current);
        let past_fingerprint = self.hasher.fingerprint(past);

        let (delta, changes) = if current_fingerprint == past_fingerprint {
            debug!("Models share fingerprint {}", self.hasher.short_hash(&current_fingerprint));
            (ModelTree::new(), ChangeSet::new())
        } else {
            compute_delta(current, past)?
        };

        let verdict = self.classifier.classify(&delta, &changes, past);
        info!(
            "Comparison finished: {verdict} ({} changed, {} added, {} removed)",
            changes.changed.len(),
            changes.added.len(),
            changes.removed.len()
        );

        Ok(DeltaReport {
            compared_at: Utc::now(),
            verdict,
            delta,
            changes,
            current_fingerprint,
            past_fingerprint,
        })
    }
}

/// Walks every differing top-level key and assembles the delta tree.
///
/// Each changed key gets its own fresh change set, which feeds that key's
/// fragment of the delta and is then appended to the run's cumulative set.
///
/// # Errors
///
/// Fails if a recorded path does not resolve in `current`.
pub fn compute_delta(current: &ModelTree, past: &ModelTree) -> Result<(ModelTree, ChangeSet)> {
    let top = TreeComparator::new(current, past);
    let mut delta = ModelTree::new();
    let mut changes = ChangeSet::new();

    for key in top.changed() {
        let key_changes = walk_changed_key(current, past, key);
        debug!(
            "Section '{key}': {} changed, {} added, {} removed",
            key_changes.changed.len(),
            key_changes.added.len(),
            key_changes.removed.len()
        );

        let mut builder = DeltaBuilder::new(current);
        builder.add_paths(key_changes.delta_paths())?;
        merge_trees(&mut delta, builder.finish());
        changes.extend(key_changes);
    }

    // Whole sections that appear or disappear
    let mut builder = DeltaBuilder::new(current);
    for key in top.added() {
        let path = DottedPath::root(key);
        builder.add_path(&path)?;
        changes.added.push(path);
    }
    merge_trees(&mut delta, builder.finish());

    changes
        .removed
        .extend(top.removed().into_iter().map(DottedPath::root));

    Ok((delta, changes))
}

impl DeltaReport {
    /// Returns true if the models differ in any way.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Returns true if the delta can be applied online.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.verdict == Verdict::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{leaves, lookup, ModelParser};

    fn parse(text: &str) -> ModelTree {
        ModelParser::new().parse_str(text, None).expect("model should parse")
    }

    fn compare(current: &str, past: &str) -> DeltaReport {
        DeltaEngine::new()
            .compare(&parse(current), &parse(past))
            .expect("comparison should succeed")
    }

    fn strings(paths: &[DottedPath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_attribute_addition_is_safe() {
        let report = compare(r#"{"a": {"x": 1, "y": 2}}"#, r#"{"a": {"x": 1}}"#);
        assert_eq!(strings(&report.changes.added), vec!["a.y"]);
        assert_eq!(report.delta, parse(r#"{"a": {"y": 2}}"#));
        assert_eq!(report.verdict, Verdict::Safe);
        assert!(report.is_safe());
    }

    #[test]
    fn test_new_deployment_section_is_unsafe() {
        let report = compare(r#"{"appDeployments": {"app1": {}}}"#, "{}");
        assert_eq!(report.verdict, Verdict::Unsafe);
        assert!(report.delta.contains_key("appDeployments"));
    }

    #[test]
    fn test_changed_deployment_is_unsafe() {
        let report = compare(
            "appDeployments:\n  Application:\n    app1: {SourcePath: v2.war}\nresources: {a: 1}\n",
            "appDeployments:\n  Application:\n    app1: {SourcePath: v1.war}\nresources: {a: 1}\n",
        );
        assert_eq!(report.verdict, Verdict::Unsafe);
    }

    #[test]
    fn test_removed_server_is_unsafe() {
        let report = compare(
            r#"{"topology": {"Server": {}}}"#,
            r#"{"topology": {"Server": {"s1": {"ListenPort": 7001}}}}"#,
        );
        assert_eq!(strings(&report.changes.removed), vec!["topology.Server.s1"]);
        assert!(report.delta.is_empty());
        assert_eq!(report.verdict, Verdict::Unsafe);
    }

    #[test]
    fn test_new_topology_section_is_fatal() {
        let report = compare(r#"{"topology": {"Cluster": {"c1": {}}}}"#, "{}");
        assert_eq!(strings(&report.changes.added), vec!["topology"]);
        assert_eq!(report.verdict, Verdict::Fatal);
    }

    #[test]
    fn test_new_server_in_existing_topology_is_fatal() {
        let report = compare(
            "topology:\n  Server:\n    s1: {ListenPort: 7001}\n    s2: {ListenPort: 7002}\n",
            "topology:\n  Server:\n    s1: {ListenPort: 7001}\n",
        );
        assert_eq!(report.verdict, Verdict::Fatal);
        assert_eq!(
            report.delta,
            parse("topology:\n  Server:\n    s2: {ListenPort: 7002}\n")
        );
    }

    #[test]
    fn test_identical_models() {
        let text = "topology:\n  Name: d1\nresources:\n  Pool: {Max: [1, 2]}\n";
        let report = compare(text, text);
        assert!(report.delta.is_empty());
        assert!(!report.has_changes());
        assert_eq!(report.verdict, Verdict::NoChange);
        assert_eq!(report.current_fingerprint, report.past_fingerprint);
    }

    #[test]
    fn test_deep_attribute_change_is_safe() {
        let report = compare(
            "resources:\n  JDBCSystemResource:\n    Generic2:\n      JdbcResource:\n        JDBCConnectionPoolParams:\n          TestConnectionsOnReserve: true\n",
            "resources:\n  JDBCSystemResource:\n    Generic2:\n      JdbcResource:\n        JDBCConnectionPoolParams:\n          TestConnectionsOnReserve: false\n",
        );
        assert_eq!(
            strings(&report.changes.changed),
            vec!["resources.JDBCSystemResource.Generic2.JdbcResource.JDBCConnectionPoolParams.TestConnectionsOnReserve"]
        );
        assert_eq!(report.verdict, Verdict::Safe);
    }

    #[test]
    fn test_changes_accumulate_across_sections() {
        let current = parse("a: {x: 2, n: 1}\nb: {y: 3}\nc: {z: same}\n");
        let past = parse("a: {x: 1}\nb: {y: 4}\nc: {z: same}\n");
        let (delta, changes) = compute_delta(&current, &past).expect("delta");

        assert_eq!(strings(&changes.changed), vec!["a.x", "b.y"]);
        assert_eq!(strings(&changes.added), vec!["a.n"]);
        assert_eq!(delta, parse("a: {x: 2, n: 1}\nb: {y: 3}\n"));
    }

    #[test]
    fn test_delta_leaves_exist_in_current() {
        let current = parse(
            "topology:\n  Server:\n    s1: {ListenPort: 7002, SSL: {Enabled: true}}\n  Name: d\nresources:\n  Pool: {Targets: [s1, s2], Max: 3}\nextra: {k: v}\n",
        );
        let past = parse(
            "topology:\n  Server:\n    s1: {ListenPort: 7001}\n  Name: d\nresources:\n  Pool: {Targets: [s1], Max: 3}\n",
        );
        let (delta, _) = compute_delta(&current, &past).expect("delta");

        assert!(!delta.is_empty());
        for (path, value) in leaves(&delta) {
            assert_eq!(lookup(&current, &path), Some(value), "leaf {path}");
        }
    }

    #[test]
    fn test_top_level_removal_recorded() {
        let report = compare("a: 1\n", "a: 1\nlegacy: {x: 1}\n");
        assert_eq!(strings(&report.changes.removed), vec!["legacy"]);
        assert_eq!(report.verdict, Verdict::Unsafe);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let engine = DeltaEngine::new();
        let first = engine
            .compare(&parse("a: {x: 1, y: 2}\n"), &parse("a: {x: 1}\n"))
            .expect("first");
        let second = engine
            .compare(&parse("b: {p: 1}\n"), &parse("b: {p: 2}\n"))
            .expect("second");

        assert_eq!(strings(&first.changes.added), vec!["a.y"]);
        assert!(second.changes.added.is_empty());
        assert_eq!(strings(&second.changes.changed), vec!["b.p"]);
    }

    #[test]
    fn test_engine_from_settings() {
        let settings = DiffSettings {
            deployment_section: String::from("apps"),
            ..DiffSettings::default()
        };
        let engine = DeltaEngine::from_settings(&settings);
        let report = engine
            .compare(&parse("apps: {a: 2}\n"), &parse("apps: {a: 1}\n"))
            .expect("compare");
        assert_eq!(report.verdict, Verdict::Unsafe);
    }

    #[test]
    fn test_report_serializes() {
        let report = compare("a: {x: 1, y: [p, q]}\n", "a: {x: 1}\n");
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["verdict"], "safe");
        assert_eq!(json["changes"]["added"][0], "a.y");
        assert_eq!(json["delta"]["a"]["y"][1], "q");
    }

    #[test]
    fn test_dotted_property_key_change_is_safe() {
        let report = compare(
            "resources:\n  JDBCSystemResource:\n    ds:\n      JdbcResource:\n        JDBCDriverParams:\n          Properties:\n            oracle.net.CONNECT_TIMEOUT: {Value: 10000}\n            user: {Value: scott}\n",
            "resources:\n  JDBCSystemResource:\n    ds:\n      JdbcResource:\n        JDBCDriverParams:\n          Properties:\n            oracle.net.CONNECT_TIMEOUT: {Value: 5000}\n            user: {Value: scott}\n",
        );
        assert_eq!(report.verdict, Verdict::Safe);
        assert_eq!(
            report.delta,
            parse(
                "resources:\n  JDBCSystemResource:\n    ds:\n      JdbcResource:\n        JDBCDriverParams:\n          Properties:\n            oracle.net.CONNECT_TIMEOUT: {Value: 10000}\n"
            )
        );
    }

    #[test]
    fn test_new_dotted_key_under_existing_entity_is_safe() {
        let report = compare(
            "topology:\n  Server:\n    s1:\n      Properties: {a.b.c: 1, x: 2}\n",
            "topology:\n  Server:\n    s1:\n      Properties: {x: 2}\n",
        );
        assert_eq!(report.changes.added[0].depth(), 5);
        assert_eq!(report.verdict, Verdict::Safe);
    }
}
