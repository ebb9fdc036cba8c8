//! Shared fixtures for CLI end-to-end tests.

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Schema requiring a string `name`.
pub const SCHEMA: &str = r#"
type: object
required: [name]
properties:
  name:
    type: string
"#;

/// A temporary project directory with a template, stubs and a schema.
pub struct TestFixture {
    pub temp: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        temp.child("tmpl.yaml")
            .write_str("name: (( values.name ))\n")
            .unwrap();
        temp.child("stubs/10-base.yaml").write_str("name: base\n").unwrap();
        temp.child("stubs/20-prod.yaml").write_str("name: prod\n").unwrap();
        temp.child("bad.yaml").write_str("replicas: 3\n").unwrap();
        temp.child("schema.yaml").write_str(SCHEMA).unwrap();
        temp.child("values.yaml").write_str("name: demo\nzone: eu\n").unwrap();
        Self { temp }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp.path()
    }
}
