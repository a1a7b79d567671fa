//! Filename-derived tags applied to an accepted record.

use std::path::Path;

use idforged_common::Metadata;
use regex::RegexBuilder;

use crate::config::ResourceConfig;

pub const LEAKED_TAG: &str = "Leaked";
pub const SUB_TAG: &str = "C";

/// Tag `data.extra` from the name of `file`.
///
/// Matching is case-insensitive. Tags are assigned, never appended, so
/// running this twice leaves the same result. Empty markers never match.
pub fn tag_from_filename(data: &mut Metadata, file: &Path, resource: &ResourceConfig) {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned());
    let lowered = name.to_lowercase();

    if contains_any(&lowered, &resource.leaked_suffix) {
        data.extra.leaked = LEAKED_TAG.to_string();
    }

    let part = resource.part_suffix.trim();
    if !part.is_empty() && lowered.contains(&part.to_lowercase()) {
        data.extra.part = part_label(&name, part);
    }

    if contains_any(&lowered, &resource.sub_suffix) {
        data.extra.sub = SUB_TAG.to_string();
    }
}

fn contains_any(lowered: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .map(|m| m.trim().to_lowercase())
        .any(|m| !m.is_empty() && lowered.contains(&m))
}

/// The first `<prefix><digit>` in `name`, in its original casing, or `""`.
fn part_label(name: &str, prefix: &str) -> String {
    RegexBuilder::new(&format!(r"{}\d", regex::escape(prefix)))
        .case_insensitive(true)
        .build()
        .ok()
        .and_then(|re| re.find(name).map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}
