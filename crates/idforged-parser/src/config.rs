//! Extractor configuration.

/// Configuration for the identifier extractor.
///
/// Use the builder pattern to add caller-supplied noise tokens on top of the
/// built-in list:
///
/// ```
/// use idforged_parser::config::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .noise_token("hhd800")
///     .noise_tokens(["4k", "uncensored"])
///     .build();
///
/// assert_eq!(config.extra_noise.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractorConfig {
    /// Additional tokens stripped from the filename before matching.
    /// Matched literally and case-insensitively, anchored at a word boundary.
    pub extra_noise: Vec<String>,
}

impl ExtractorConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }
}

/// Builder for `ExtractorConfig`.
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfigBuilder {
    extra_noise: Vec<String>,
}

impl ExtractorConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single noise token. Blank tokens are ignored.
    pub fn noise_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.trim().is_empty() {
            self.extra_noise.push(token);
        }
        self
    }

    /// Add several noise tokens.
    pub fn noise_tokens<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tokens.into_iter().fold(self, |b, t| b.noise_token(t))
    }

    /// Build the configuration.
    pub fn build(self) -> ExtractorConfig {
        ExtractorConfig {
            extra_noise: self.extra_noise,
        }
    }
}
