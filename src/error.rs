//! Error types for color parsing, token validation, resolution and config loading.
//!
//! Every error here is a configuration-time error: nothing in this crate runs
//! while content is being rendered, so all of them are meant to abort the
//! build before any output is produced.

use std::path::PathBuf;

use thiserror::Error;

use crate::tokens::TokenName;

/// A color literal that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not valid color syntax.
    #[error("malformed color '{input}': {reason}")]
    Malformed { input: String, reason: String },
    /// A channel value is outside `0..=255`.
    #[error("color '{input}' has channel value {value} outside 0..=255")]
    ChannelOutOfRange { input: String, value: i64 },
}

/// A design token set that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A required token slot is absent.
    #[error("missing design token '{token}'")]
    Missing { token: TokenName },
    /// A color token holds an invalid color.
    #[error("design token '{token}' is not a valid color")]
    InvalidColor {
        token: TokenName,
        #[source]
        source: ColorError,
    },
    /// A font token holds an invalid font stack.
    #[error("design token '{token}' is not a valid font stack: {reason}")]
    InvalidFont { token: TokenName, reason: String },
    /// A value of the wrong kind was stored in a slot (font in a color slot or vice versa).
    #[error("design token '{token}' expects a {expected} value")]
    WrongKind {
        token: TokenName,
        expected: &'static str,
    },
}

/// Error returned when the override template cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A template leaf references a token the token source does not provide.
    #[error("unknown token '{token}' referenced at '{path}'")]
    UnknownToken { path: String, token: TokenName },
    /// A template leaf references a font token where a color is needed.
    #[error("token '{token}' at '{path}' is not a color")]
    NotAColor { path: String, token: TokenName },
    /// The token set itself is invalid.
    #[error(transparent)]
    Tokens(#[from] TokenError),
}

/// Error returned while loading or validating the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration document is not valid YAML.
    #[error("invalid YAML configuration")]
    Yaml(#[from] serde_yaml::Error),
    /// The configuration document is not valid JSON.
    #[error("invalid JSON configuration")]
    Json(#[from] serde_json::Error),
    /// The file extension does not name a supported format.
    #[error("unsupported config format '{path}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },
    /// The site base URL is not an absolute http(s) URL.
    #[error("invalid site URL '{site}': {reason}")]
    InvalidSite { site: String, reason: String },
    /// An integration is listed more than once.
    #[error("integration '{name}' is listed more than once")]
    DuplicateIntegration { name: String },
    /// The content glob has no extensions or an invalid one.
    #[error("invalid content glob: {reason}")]
    InvalidContent { reason: String },
    /// A typography variant name is empty or repeated.
    #[error("typography variant '{name}' is empty or already defined")]
    DuplicateVariant { name: String },
    /// The syntax-highlighting theme file is missing or malformed.
    #[error("highlight theme '{path}': {reason}")]
    ThemeFile { path: PathBuf, reason: String },
    /// The color or font tokens are invalid.
    #[error(transparent)]
    Tokens(#[from] TokenError),
    /// The override tree could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
