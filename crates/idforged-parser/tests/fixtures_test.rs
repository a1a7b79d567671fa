//! Fixture-driven tests for identifier extraction.
//!
//! Each case in `tests/fixtures/identifiers.json` names the raw filename stem,
//! the expected identifier (or `null` for no match) and the family that should
//! produce it.

use idforged_parser::{extract, Extractor, Family};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TestCase {
    input: String,
    expected: Option<String>,
    family: Option<String>,
}

fn load_cases() -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/identifiers.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&content).expect("fixture file should be valid JSON")
}

#[test]
fn all_fixtures_match() {
    let extractor = Extractor::default();
    let mut failures = Vec::new();

    for case in load_cases() {
        let found = extractor.classify(&case.input);
        let identifier = found.as_ref().map(|f| f.identifier.to_string());
        let family = found.as_ref().map(|f| f.family.as_str().to_string());

        if identifier != case.expected || family != case.family {
            failures.push(format!(
                "{:?}: expected {:?} ({:?}), got {:?} ({:?})",
                case.input, case.expected, case.family, identifier, family
            ));
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn every_family_is_covered_by_fixtures() {
    let cases = load_cases();
    for family in Family::ALL {
        assert!(
            cases
                .iter()
                .any(|c| c.family.as_deref() == Some(family.as_str())),
            "no fixture exercises family {family}"
        );
    }
}

#[test]
fn undelimited_results_have_exactly_one_hyphen() {
    for stem in ["abp454", "SSIS001", "mkbd120", "123456ABCD", "kmhrs026"] {
        let id = extract(stem).unwrap_or_else(|| panic!("{stem} should match"));
        assert_eq!(
            id.as_str().matches('-').count(),
            1,
            "{stem} -> {id} should contain exactly one hyphen"
        );
    }
}

#[test]
fn extraction_is_deterministic() {
    let extractor = Extractor::default();
    for case in load_cases() {
        assert_eq!(extractor.extract(&case.input), extractor.extract(&case.input));
    }
}
