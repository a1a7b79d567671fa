//! Noise stripping applied before the pattern cascade.
//!
//! Filenames carry resolution markers, site tags and other garbage that would
//! otherwise be picked up by the generic patterns (`1080p` looks a lot like a
//! catalog number to a naive matcher). Each token is removed together with the
//! single non-word character that follows it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in noise tokens as regex fragments.
const BUILTIN_TOKENS: &[&str] = &[
    r"cd\d$",
    "1080p",
    "1pon",
    r"\.com",
    "nyap2p",
    r"22-sht\.me",
    "carib",
];

static BUILTIN_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&noise_pattern(BUILTIN_TOKENS.iter().map(|t| t.to_string())))
        .expect("built-in noise regex should compile")
});

fn noise_pattern(fragments: impl Iterator<Item = String>) -> String {
    let alternation = fragments.collect::<Vec<_>>().join("|");
    format!(r"(?i)\b(?:{alternation})(?:\W|$)")
}

/// Removes known noise tokens from a filename stem.
#[derive(Debug, Clone)]
pub(crate) struct NoiseFilter {
    pattern: Regex,
}

impl NoiseFilter {
    /// Build a filter from the built-in tokens plus caller-supplied literals.
    pub(crate) fn new(extra: &[String]) -> Self {
        let extra: Vec<String> = extra
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if extra.is_empty() {
            return Self::default();
        }

        let fragments = BUILTIN_TOKENS.iter().map(|t| t.to_string()).chain(extra);
        // Escaped literals cannot produce an invalid pattern; only the regex
        // size limit could reject it, in which case the built-ins still apply.
        let pattern =
            Regex::new(&noise_pattern(fragments)).unwrap_or_else(|_| BUILTIN_NOISE.clone());
        Self { pattern }
    }

    /// Strip noise tokens, then trailing `-`/`c`/`C` left behind by
    /// subtitle markers such as `-C`.
    pub(crate) fn strip(&self, stem: &str) -> String {
        let cleaned = self.pattern.replace_all(stem, "");
        cleaned.trim_end_matches(['-', 'c', 'C']).to_string()
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            pattern: BUILTIN_NOISE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_resolution_marker() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.strip("1080p.ABP-454"), "ABP-454");
        assert_eq!(filter.strip("ABP-454 1080P "), "ABP-454 ");
    }

    #[test]
    fn strips_site_tags_case_insensitively() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.strip("NYAP2P-SSIS-001"), "SSIS-001");
        assert_eq!(filter.strip("22-sht.me-IPX-177"), "IPX-177");
        assert_eq!(filter.strip("CARIB-010120_001"), "010120_001");
    }

    #[test]
    fn strips_trailing_disc_marker() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.strip("abp-454-cd1"), "abp-454");
        // Only at the end of the stem.
        assert_eq!(filter.strip("abp-454-cd1-x"), "abp-454-cd1-x");
    }

    #[test]
    fn trims_subtitle_suffix() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.strip("SSIS-001-C"), "SSIS-001");
        assert_eq!(filter.strip("SSIS-001c"), "SSIS-001");
        assert_eq!(filter.strip("SSIS-001"), "SSIS-001");
    }

    #[test]
    fn word_boundary_protects_embedded_tokens() {
        let filter = NoiseFilter::default();
        // "carib" inside a longer word is not a site tag.
        assert_eq!(filter.strip("scaribbean-123"), "scaribbean-123");
    }

    #[test]
    fn extra_tokens_are_literal() {
        let filter = NoiseFilter::new(&["hhd800".to_string(), "a.b".to_string()]);
        assert_eq!(filter.strip("HHD800@ABP-454"), "ABP-454");
        // The dot is escaped, so "axb" is left alone.
        assert_eq!(filter.strip("axb-ABP-454"), "axb-ABP-454");
        assert_eq!(filter.strip("a.b-ABP-454"), "ABP-454");
    }

    #[test]
    fn blank_extra_tokens_are_ignored() {
        let filter = NoiseFilter::new(&["".to_string(), "  ".to_string()]);
        assert_eq!(filter.strip("1080p.ABP-454"), "ABP-454");
    }
}
