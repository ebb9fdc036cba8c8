//! Named custom functions made available to the render engine

use crate::error::{Error, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A custom function over YAML values
pub type Function = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Table of named custom functions
///
/// Cloning is cheap; the functions themselves are shared.
#[derive(Clone, Default)]
pub struct Functions {
    table: BTreeMap<String, Function>,
}

impl Functions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Arc::new(function));
        self
    }

    /// Builder-style variant of [`Functions::register`]
    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.table.get(name)
    }

    /// Registered function names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.table.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Invoke the function registered under `name`
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let function = self.get(name).ok_or_else(|| Error::Function {
            name: name.to_string(),
            message: "unknown function".to_string(),
        })?;
        function(args)
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(args: &[Value]) -> Result<Value> {
        match args.first().and_then(Value::as_str) {
            Some(s) => Ok(Value::String(s.to_uppercase())),
            None => Err(Error::Function {
                name: "upper".to_string(),
                message: "expected a string argument".to_string(),
            }),
        }
    }

    #[test]
    fn test_register_and_call() {
        let functions = Functions::new().with("upper", upper);
        assert_eq!(functions.len(), 1);
        assert_eq!(
            functions
                .call("upper", &[Value::String("abc".to_string())])
                .unwrap(),
            Value::String("ABC".to_string())
        );
        assert!(functions.call("upper", &[]).is_err());
    }

    #[test]
    fn test_unknown_function() {
        let functions = Functions::new();
        assert!(functions.is_empty());
        let err = functions.call("missing", &[]).unwrap_err();
        assert!(err.to_string().contains("unknown function"));
    }

    #[test]
    fn test_names_sorted_and_clone_shares() {
        let mut functions = Functions::new();
        functions
            .register("b", |_| Ok(Value::Null))
            .register("a", |_| Ok(Value::Bool(true)));
        let copy = functions.clone();
        assert_eq!(copy.names(), vec!["a", "b"]);
        assert!(Arc::ptr_eq(
            functions.get("a").unwrap(),
            copy.get("a").unwrap()
        ));
        assert_eq!(format!("{:?}", copy), r#"{"a", "b"}"#);
    }
}
