//! Schema validation of template and stub documents
//!
//! The request builder only needs a `validate(source, schema)` capability,
//! expressed as the [`SchemaValidator`] trait. [`JsonSchemaValidator`] is the
//! built-in implementation: it reads both documents as YAML (so JSON works
//! too), converts them to JSON values and hands them to the `jsonschema`
//! crate, which covers the full keyword set including `$ref`, `allOf`,
//! `anyOf`, `oneOf` and `not`.
//!
//! The first violation is reported as [`Error::Schema`] together with the
//! JSON pointer of the offending node (`/` for the document root).

use crate::error::{Error, Result};
use log::debug;
use serde_json::Value;
use std::fmt::Debug;

/// Checks document bytes against schema bytes
pub trait SchemaValidator: Debug + Send + Sync {
    fn validate(&self, source: &[u8], schema: &[u8]) -> Result<()>;
}

/// JSON Schema validator for YAML or JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, source: &[u8], schema: &[u8]) -> Result<()> {
        let schema = parse_document(schema)?;
        let document = parse_document(source)?;

        let validator = jsonschema::validator_for(&schema).map_err(|e| Error::Schema {
            path: "/".to_string(),
            message: format!("invalid schema: {}", e),
        })?;

        let first = validator.iter_errors(&document).next().map(|e| Error::Schema {
            path: pointer(&e.instance_path.to_string()),
            message: e.to_string(),
        });
        match first {
            Some(err) => Err(err),
            None => {
                debug!("document conforms to schema");
                Ok(())
            }
        }
    }
}

/// Parse YAML (or JSON) bytes into a JSON value
pub fn parse_document(data: &[u8]) -> Result<Value> {
    Ok(serde_yaml::from_slice::<Value>(data)?)
}

fn pointer(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}
