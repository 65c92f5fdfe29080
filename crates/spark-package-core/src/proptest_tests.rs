//! Property-based tests for spark-package-core types.
//!
//! These tests use proptest to verify invariants across many randomly generated inputs.

use proptest::prelude::*;

use crate::pom::{merge_descriptor, Coordinates, PomDocument, Repository};
use crate::{DependencySpec, Error, PackageName};

/// Strategy for generating valid name segments.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,20}"
}

/// Strategy for generating versions.
fn version_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,2}\\.[0-9]{1,2}(\\.[0-9]{1,2})?"
}

/// Strategy for generating dependencies.
fn dependency_strategy() -> impl Strategy<Value = DependencySpec> {
    (segment_strategy(), segment_strategy(), version_strategy())
        .prop_map(|(group, artifact, version)| DependencySpec::new(group, artifact, version))
}

/// Strategy for generating coordinates.
fn coordinates_strategy() -> impl Strategy<Value = Coordinates> {
    (segment_strategy(), segment_strategy(), version_strategy())
        .prop_map(|(group, artifact, version)| Coordinates::new(group, artifact, version))
}

fn merge(existing: Option<&str>, coordinates: &Coordinates, deps: &[DependencySpec]) -> String {
    merge_descriptor(existing, coordinates, deps, &Repository::spark_packages()).unwrap()
}

proptest! {
    /// Test that any two valid segments joined by a slash form a valid name.
    #[test]
    fn package_name_accepts_valid_segments(
        org in segment_strategy(),
        repo in segment_strategy(),
    ) {
        let name = PackageName::parse(&format!("{org}/{repo}")).unwrap();
        prop_assert_eq!(name.organization(), org.as_str());
        prop_assert_eq!(name.repository(), repo.as_str());
    }

    /// Test that names without exactly one slash are rejected.
    #[test]
    fn package_name_rejects_wrong_slash_count(
        segments in prop::collection::vec(segment_strategy(), 3..5),
    ) {
        let joined = segments.join("/");
        prop_assert!(
            matches!(PackageName::parse(&joined), Err(Error::NameSlashCount { .. })),
            "expected a slash count error"
        );
        let err = PackageName::parse(&segments.concat()).unwrap_err();
        prop_assert!(matches!(err, Error::NameSlashCount { .. }), "expected a slash count error");
    }

    /// Test that a dependency line parses back into its parts.
    #[test]
    fn dependency_line_parses(dep in dependency_strategy()) {
        let parsed = DependencySpec::parse(&dep.to_string()).unwrap();
        prop_assert_eq!(parsed, dep);
    }

    /// Test that merging the same inputs into a merged descriptor changes nothing.
    #[test]
    fn merge_is_idempotent(
        coordinates in coordinates_strategy(),
        deps in prop::collection::vec(dependency_strategy(), 0..6),
    ) {
        let once = merge(None, &coordinates, &deps);
        let twice = merge(Some(&once), &coordinates, &deps);
        prop_assert_eq!(once, twice);
    }

    /// Test that merging never removes dependencies already declared.
    #[test]
    fn merge_is_monotonic(
        coordinates in coordinates_strategy(),
        first in prop::collection::vec(dependency_strategy(), 0..6),
        second in prop::collection::vec(dependency_strategy(), 0..6),
    ) {
        let base = merge(None, &coordinates, &first);
        let merged = merge(Some(&base), &coordinates, &second);

        let before = PomDocument::parse(&base).unwrap().dependencies();
        let after = PomDocument::parse(&merged).unwrap().dependencies();
        for dep in &before {
            prop_assert!(after.contains(dep), "lost dependency {}", dep);
        }
    }

    /// Test that no two dependencies share a (groupId, artifactId) key.
    #[test]
    fn merge_has_unique_dependency_keys(
        coordinates in coordinates_strategy(),
        deps in prop::collection::vec(dependency_strategy(), 0..10),
    ) {
        let mut doubled = deps.clone();
        doubled.extend(deps.iter().map(|d| DependencySpec::new(&d.group_id, &d.artifact_id, "9.9")));
        let merged = merge(None, &coordinates, &doubled);
        let declared = PomDocument::parse(&merged).unwrap().dependencies();

        let mut keys: Vec<(String, String)> = declared
            .iter()
            .map(|d| (d.group_id.clone(), d.artifact_id.clone()))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
    }

    /// Test that the Spark Packages repository appears exactly once.
    #[test]
    fn merge_declares_repository_once(coordinates in coordinates_strategy()) {
        let once = merge(None, &coordinates, &[]);
        let twice = merge(Some(&once), &coordinates, &[]);
        let urls = PomDocument::parse(&twice).unwrap().repository_urls();
        prop_assert_eq!(urls, vec![Repository::spark_packages().url]);
    }
}
