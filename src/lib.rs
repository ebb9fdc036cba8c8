//! # Spiff Request Library
//!
//! This library assembles the request for a spiff template merge: a template
//! document merged with zero or more stub documents, parameter values and
//! custom functions. The merge itself is performed by a render engine; this
//! crate only builds and checks what is handed to it.
//!
//! ## Quick Example
//!
//! ```
//! use spiff_request::filesystem::MemoryFS;
//! use spiff_request::options::{self, get_request};
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string("/app/tmpl.yaml", "name: (( values.name ))").unwrap();
//! fs.add_file_string("/app/override.yaml", "name: prod").unwrap();
//!
//! let schema = "type: object\nrequired: [name]\n";
//! let request = get_request([
//!     options::file_system(fs.into_shared()),
//!     options::work_dir("/app"),
//!     options::validated(
//!         schema,
//!         [
//!             options::template_file("tmpl.yaml"),
//!             options::stub_file("override.yaml"),
//!         ],
//!     ),
//! ])
//! .unwrap();
//!
//! assert_eq!(request.template.unwrap().name(), "tmpl.yaml");
//! assert_eq!(request.stubs[0].name(), "override.yaml");
//! ```
//!
//! ## Core Concepts
//!
//! - **Request (`request`)**: The configuration of one merge: filesystem,
//!   values, functions, template, ordered stubs and render mode.
//! - **Sources (`source`)**: Named template and stub documents, either inline
//!   or read lazily from a filesystem.
//! - **Options (`options`)**: Individual configuration steps. They apply in
//!   order and stop at the first error. `validated` checks the sources its
//!   inner options produce against a schema before committing them.
//! - **Filesystems (`filesystem`)**: The process filesystem, an in-memory
//!   filesystem and working-directory scoped views.
//! - **Collaborators**: schema validation (`validate`), ambient contexts
//!   (`context`), the repository config file (`config`) and OCI manifests
//!   (`oci`).

pub mod config;
pub mod context;
pub mod error;
pub mod filesystem;
pub mod functions;
pub mod oci;
pub mod options;
pub mod output;
pub mod request;
pub mod source;
pub mod validate;

pub use error::{Error, Result};
pub use options::{get_request, ApplyToRequest, Options, RequestOption};
pub use request::{Mode, Request};
pub use source::Source;

#[cfg(test)]
mod options_proptest;
