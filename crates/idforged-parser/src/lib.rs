//! # idforged-parser
//!
//! Extracts a canonical catalog identifier from a noisy video filename.
//!
//! Extraction runs in two steps: known noise tokens (resolution markers, site
//! tags, disc suffixes) are stripped, then an ordered cascade of pattern
//! families is tried and the first match wins. See [`Family`] for the order.
//!
//! ## Quick Start
//!
//! ```
//! use idforged_parser::extract;
//!
//! let id = extract("[nyap2p]ABP-454-C").unwrap();
//! assert_eq!(id.as_str(), "ABP-454");
//!
//! assert!(extract("family holiday").is_none());
//! ```
//!
//! ## Extra Noise Tokens
//!
//! ```
//! use idforged_parser::{Extractor, Family};
//! use idforged_parser::config::ExtractorConfig;
//!
//! let config = ExtractorConfig::builder().noise_token("hhd800").build();
//! let extractor = Extractor::new(config);
//!
//! let found = extractor.classify("hhd800@SSIS-001").unwrap();
//! assert_eq!(found.identifier.as_str(), "SSIS-001");
//! assert_eq!(found.family, Family::Delimited);
//! ```

pub mod config;
mod identifier;
mod noise;
mod patterns;

use std::path::Path;

use config::ExtractorConfig;
use noise::NoiseFilter;

pub use identifier::{compact, Identifier};
pub use patterns::Family;

/// Extract an identifier from a filename stem using default settings.
pub fn extract(stem: &str) -> Option<Identifier> {
    Extractor::default().extract(stem)
}

/// A successful extraction: the identifier and the family that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extraction {
    /// The extracted identifier.
    pub identifier: Identifier,
    /// The pattern family that matched.
    pub family: Family,
}

/// A configurable identifier extractor.
///
/// Construction compiles the noise filter once; extraction itself does not
/// allocate regexes and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    noise: NoiseFilter,
}

impl Extractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: ExtractorConfig) -> Self {
        let noise = NoiseFilter::new(&config.extra_noise);
        Self { config, noise }
    }

    /// The configuration this extractor was built with.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract an identifier from a filename stem.
    ///
    /// # Examples
    ///
    /// ```
    /// use idforged_parser::Extractor;
    ///
    /// let extractor = Extractor::default();
    /// assert_eq!(extractor.extract("abp454").unwrap().as_str(), "abp-454");
    /// ```
    pub fn extract(&self, stem: &str) -> Option<Identifier> {
        self.classify(stem).map(|found| found.identifier)
    }

    /// Extract an identifier from the stem of `path`.
    pub fn extract_path(&self, path: &Path) -> Option<Identifier> {
        let stem = path.file_stem()?.to_str()?;
        self.extract(stem)
    }

    /// Extract an identifier and report which family matched.
    pub fn classify(&self, stem: &str) -> Option<Extraction> {
        let cleaned = self.clean(stem);
        let (raw, family) = patterns::cascade(&cleaned)?;
        let identifier = Identifier::new(raw)?;
        Some(Extraction { identifier, family })
    }

    /// The stem after noise stripping, before any pattern is applied.
    pub fn clean(&self, stem: &str) -> String {
        self.noise.strip(stem)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extract_with_noise() {
        assert_eq!(extract("ABP-454.1080p").unwrap().as_str(), "ABP-454");
        assert_eq!(extract("22-sht.me-IPX-177-C").unwrap().as_str(), "IPX-177");
    }

    #[test]
    fn test_extract_path_uses_stem() {
        let extractor = Extractor::default();
        let path = PathBuf::from("/media/incoming/SSIS-001.mp4");
        assert_eq!(extractor.extract_path(&path).unwrap().as_str(), "SSIS-001");
    }

    #[test]
    fn test_extract_path_without_stem() {
        let extractor = Extractor::default();
        assert!(extractor.extract_path(Path::new("/")).is_none());
    }

    #[test]
    fn test_classify_reports_family() {
        let extractor = Extractor::default();
        let found = extractor.classify("FC2-PPV-1234567").unwrap();
        assert_eq!(found.family, Family::Fc2);
        assert_eq!(found.identifier.as_str(), "FC2-1234567");
    }

    #[test]
    fn test_disc_suffix_does_not_leak_into_identifier() {
        assert_eq!(extract("abp454-cd2").unwrap().as_str(), "abp-454");
    }

    #[test]
    fn test_custom_noise() {
        let config = ExtractorConfig::builder().noise_token("uncensored").build();
        let extractor = Extractor::new(config);
        assert_eq!(extractor.clean("uncensored-n1010"), "n1010");
        assert_eq!(extractor.config().extra_noise.len(), 1);
    }
}
