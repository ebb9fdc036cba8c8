//! # Error Handling
//!
//! This module defines the centralized error type for `spiff-request`. It uses
//! the `thiserror` library to build a single `Error` enum covering every
//! failure that can occur while a rendering request is assembled.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. Each variant carries enough
//!   context (a source name, a path) to tell the caller what went wrong.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into a few groups:
//!
//! - Request assembly: empty template content, working directory scoping,
//!   schema validation of templates and stubs.
//! - Collaborators: ambient context lookup, custom functions, the config
//!   file reader and OCI digests.
//! - Wrapped library errors: I/O, YAML and JSON.
//!
//! Errors returned by options or collaborators that this crate does not
//! produce itself are passed through unchanged.

use thiserror::Error;

/// Main error type for spiff-request operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required content was empty, e.g. template data with zero length.
    #[error("no template data for {name}")]
    EmptyInput { name: String },

    /// Working directory scoping or path resolution failed.
    #[error("Filesystem error for {path}: {message}")]
    Filesystem { path: String, message: String },

    /// A template or stub failed schema validation.
    ///
    /// `kind` is either `template` or `stub`; the underlying failure is kept
    /// as the error source.
    #[error("Schema validation failed for {kind} {name}: {source}")]
    SchemaValidation {
        kind: String,
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A document does not conform to a schema.
    #[error("Schema violation at {path}: {message}")]
    Schema { path: String, message: String },

    /// Looking up an attribute of an ambient context failed.
    #[error("Context lookup error: {message}")]
    Context { message: String },

    /// A registered custom function failed or is unknown.
    #[error("Function error: {name} - {message}")]
    Function { name: String, message: String },

    /// The config file could not be read or parsed.
    ///
    /// The I/O or YAML failure is kept as the error source.
    #[error("{message} {path}: {source}")]
    Config {
        path: String,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An OCI content digest is malformed.
    #[error("Invalid digest: {message}")]
    Digest { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_empty_input() {
        let error = Error::EmptyInput {
            name: "template.yaml".to_string(),
        };
        assert_eq!(format!("{}", error), "no template data for template.yaml");
    }

    #[test]
    fn test_error_display_filesystem() {
        let error = Error::Filesystem {
            path: "/app".to_string(),
            message: "cannot set working directory".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Filesystem error"));
        assert!(display.contains("/app"));
        assert!(display.contains("cannot set working directory"));
    }

    #[test]
    fn test_error_schema_validation_keeps_source() {
        let error = Error::SchemaValidation {
            kind: "stub".to_string(),
            name: "override.yaml".to_string(),
            source: Box::new(Error::Schema {
                path: "/replicas".to_string(),
                message: "expected integer".to_string(),
            }),
        };
        let display = format!("{}", error);
        assert!(display.contains("stub override.yaml"));
        assert!(display.contains("expected integer"));

        let source = error.source().expect("source should be set");
        assert!(source.to_string().contains("/replicas"));
    }

    #[test]
    fn test_error_config() {
        let error = Error::Config {
            path: "/etc/cfg.yaml".to_string(),
            message: "cannot read config file".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "not found",
            )),
        };
        assert_eq!(
            format!("{}", error),
            "cannot read config file /etc/cfg.yaml: not found"
        );
        assert_eq!(error.source().unwrap().to_string(), "not found");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }

    #[test]
    fn test_error_function() {
        let error = Error::Function {
            name: "upper".to_string(),
            message: "unknown function".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Function error"));
        assert!(display.contains("upper"));
    }
}
