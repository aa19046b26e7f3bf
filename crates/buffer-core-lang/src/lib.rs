#![warn(missing_docs)]
//! `buffer-core-lang` - data-driven language configuration for `buffer-core` tokenizers.
//!
//! A [`LanguageConfig`] is a plain value: keyword set, comment markers, preprocessor marker,
//! brace characters and indent step. Tokenizers receive it at construction and never consult
//! global state. Configs can be built in code ([`LanguageConfig::c_family`]) or loaded from YAML:
//!
//! ```rust
//! use buffer_core_lang::LanguageConfig;
//!
//! let config = LanguageConfig::from_yaml_str(
//!     r#"
//! name: Tiny
//! file_extensions: [tiny]
//! keywords: [if, else, loop]
//! comments:
//!   line: "--"
//! "#,
//! )
//! .unwrap();
//! assert!(config.is_keyword("loop"));
//! assert_eq!(config.indent_step, 2);
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// Default number of spaces a `{` adds to the inferred indent.
pub const DEFAULT_INDENT_STEP: usize = 2;

/// Errors produced while loading or validating a [`LanguageConfig`].
#[derive(Debug, Error)]
pub enum LanguageConfigError {
    /// YAML parsing failed.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A keyword was the empty string.
    #[error("keyword set contains an empty keyword")]
    EmptyKeyword,

    /// A keyword contained whitespace or a non-word character.
    #[error("invalid keyword '{0}': keywords are single words")]
    InvalidKeyword(String),

    /// Only one of the block comment markers was configured.
    #[error("block comments need both a start and an end marker")]
    IncompleteBlockComment,
}

/// Comment markers for a language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Line comment marker (e.g. `//`).
    pub line: Option<String>,
    /// Block comment opener (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment closer (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Line and block comment markers.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// The line comment marker, if configured and non-empty.
    pub fn line_marker(&self) -> Option<&str> {
        self.line.as_deref().filter(|s| !s.is_empty())
    }

    /// The block comment markers, if both are configured and non-empty.
    pub fn block_markers(&self) -> Option<(&str, &str)> {
        let start = self.block_start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.block_end.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }
}

/// Opening and closing brace characters used for indent inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BracePair {
    /// Opens a nested block.
    pub open: char,
    /// Closes a nested block.
    pub close: char,
}

impl Default for BracePair {
    fn default() -> Self {
        Self {
            open: '{',
            close: '}',
        }
    }
}

/// Lexical configuration for one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    /// Display name.
    pub name: String,

    /// File extensions (without the dot) this language applies to.
    #[serde(default)]
    pub file_extensions: Vec<String>,

    /// Reserved words highlighted as keywords.
    #[serde(default)]
    pub keywords: BTreeSet<String>,

    /// Comment markers.
    #[serde(default)]
    pub comments: CommentConfig,

    /// Marker that turns a whole line into a preprocessor directive when it starts the line.
    #[serde(default)]
    pub preprocessor: Option<String>,

    /// Brace characters.
    #[serde(default)]
    pub braces: BracePair,

    /// Spaces added to the inferred indent per brace level.
    #[serde(default = "default_indent_step")]
    pub indent_step: usize,
}

fn default_indent_step() -> usize {
    DEFAULT_INDENT_STEP
}

const C_FAMILY_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "asm", "auto", "bool", "break", "case", "catch", "char", "class",
    "const", "const_cast", "constexpr", "continue", "decltype", "default", "delete", "do",
    "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float",
    "for", "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new",
    "noexcept", "nullptr", "operator", "private", "protected", "public", "register",
    "reinterpret_cast", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "throw", "true", "try", "typedef",
    "typeid", "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t",
    "while",
];

impl LanguageConfig {
    /// An empty configuration: no keywords, no comments, default braces.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_extensions: Vec::new(),
            keywords: BTreeSet::new(),
            comments: CommentConfig::default(),
            preprocessor: None,
            braces: BracePair::default(),
            indent_step: DEFAULT_INDENT_STEP,
        }
    }

    /// The shipped C/C++ configuration.
    pub fn c_family() -> Self {
        Self {
            name: "C/C++".to_string(),
            file_extensions: ["c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keywords: C_FAMILY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            comments: CommentConfig::line_and_block("//", "/*", "*/"),
            preprocessor: Some("#".to_string()),
            braces: BracePair::default(),
            indent_step: DEFAULT_INDENT_STEP,
        }
    }

    /// Parse and validate a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LanguageConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the keyword set and comment markers.
    pub fn validate(&self) -> Result<(), LanguageConfigError> {
        for keyword in &self.keywords {
            if keyword.is_empty() {
                return Err(LanguageConfigError::EmptyKeyword);
            }
            if !keyword.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(LanguageConfigError::InvalidKeyword(keyword.clone()));
            }
        }
        let has_start = self.comments.block_start.as_deref().is_some_and(|s| !s.is_empty());
        let has_end = self.comments.block_end.as_deref().is_some_and(|s| !s.is_empty());
        if has_start != has_end {
            return Err(LanguageConfigError::IncompleteBlockComment);
        }
        Ok(())
    }

    /// Builder-style keyword replacement.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Check if `word` is in the keyword set.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Check if this language claims the file extension `ext` (case-insensitive, no dot).
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.file_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

/// Language configurations looked up by name or file extension.
///
/// Later registrations win when two configs claim the same extension.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<Arc<LanguageConfig>>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only [`LanguageConfig::c_family`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LanguageConfig::c_family());
        registry
    }

    /// Add a configuration and return the shared handle to it.
    pub fn register(&mut self, config: LanguageConfig) -> Arc<LanguageConfig> {
        let config = Arc::new(config);
        self.languages.push(Arc::clone(&config));
        config
    }

    /// Parse a YAML configuration and register it.
    pub fn register_yaml(&mut self, yaml: &str) -> Result<Arc<LanguageConfig>, LanguageConfigError> {
        Ok(self.register(LanguageConfig::from_yaml_str(yaml)?))
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Find a language by display name.
    pub fn by_name(&self, name: &str) -> Option<Arc<LanguageConfig>> {
        self.languages
            .iter()
            .rev()
            .find(|config| config.name == name)
            .cloned()
    }

    /// Find a language claiming the extension `ext`.
    pub fn for_extension(&self, ext: &str) -> Option<Arc<LanguageConfig>> {
        let ext = ext.trim_start_matches('.');
        self.languages
            .iter()
            .rev()
            .find(|config| config.matches_extension(ext))
            .cloned()
    }

    /// Find a language for a file path by its extension.
    pub fn for_path(&self, path: &Path) -> Option<Arc<LanguageConfig>> {
        let ext = path.extension()?.to_str()?;
        self.for_extension(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_family_defaults() {
        let config = LanguageConfig::c_family();
        assert!(config.is_keyword("while"));
        assert!(!config.is_keyword("While"));
        assert_eq!(config.comments.line_marker(), Some("//"));
        assert_eq!(config.comments.block_markers(), Some(("/*", "*/")));
        assert_eq!(config.preprocessor.as_deref(), Some("#"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_keywords() {
        let config = LanguageConfig::new("x").with_keywords([""]);
        assert!(matches!(config.validate(), Err(LanguageConfigError::EmptyKeyword)));

        let config = LanguageConfig::new("x").with_keywords(["two words"]);
        assert!(matches!(
            config.validate(),
            Err(LanguageConfigError::InvalidKeyword(k)) if k == "two words"
        ));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = LanguageRegistry::with_defaults();
        assert!(registry.for_extension("CPP").is_some());
        assert!(registry.for_extension(".h").is_some());
        assert!(registry.for_path(Path::new("src/main.c")).is_some());
        assert!(registry.for_path(Path::new("README")).is_none());
        assert!(registry.by_name("C/C++").is_some());
    }
}
