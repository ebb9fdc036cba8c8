//! OCI image manifests
//!
//! Just enough of the OCI image spec to describe an artifact and look up the
//! descriptor of one of its blobs by digest.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const MEDIA_TYPE_IMAGE_MANIFEST: &str = "application/vnd.oci.image.manifest.v1+json";
pub const MEDIA_TYPE_IMAGE_CONFIG: &str = "application/vnd.oci.image.config.v1+json";
pub const MEDIA_TYPE_IMAGE_LAYER: &str = "application/vnd.oci.image.layer.v1.tar+gzip";

/// Schema version written by [`Manifest::new`]
pub const SCHEMA_VERSION: u32 = 2;

fn digest_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:[.+_-][a-z0-9]+)*:[a-zA-Z0-9=_-]+$").expect("valid digest regex")
    })
}

/// Content digest in `algorithm:encoded` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    pub fn parse(s: &str) -> Result<Self> {
        if digest_regex().is_match(s) {
            Ok(Digest(s.to_string()))
        } else {
            Err(Error::Digest {
                message: format!("'{}' is not of the form algorithm:encoded", s),
            })
        }
    }

    pub fn algorithm(&self) -> &str {
        self.0.split_once(':').map(|(a, _)| a).unwrap_or_default()
    }

    pub fn encoded(&self) -> &str {
        self.0.split_once(':').map(|(_, e)| e).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Digest::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Digest::parse(&s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Reference to a blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub media_type: String,
    pub digest: Digest,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Descriptor {
    pub fn new(media_type: impl Into<String>, digest: Digest, size: u64) -> Self {
        Self {
            media_type: media_type.into(),
            digest,
            size,
            urls: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }
}

/// OCI image manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    pub config: Descriptor,
    #[serde(default)]
    pub layers: Vec<Descriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Serialized blob with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobAccess {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl Manifest {
    /// An empty manifest for the given config blob
    pub fn new(config: Descriptor) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            media_type: MEDIA_TYPE_IMAGE_MANIFEST.to_string(),
            config,
            layers: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Descriptor of the blob with `digest`, checking the config before the
    /// layers.
    pub fn blob_descriptor(&self, digest: &Digest) -> Option<&Descriptor> {
        if &self.config.digest == digest {
            return Some(&self.config);
        }
        self.layers.iter().find(|layer| &layer.digest == digest)
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Serialize the manifest as a blob
    pub fn to_blob_access(&self) -> Result<BlobAccess> {
        Ok(BlobAccess {
            media_type: MEDIA_TYPE_IMAGE_MANIFEST.to_string(),
            data: serde_json::to_vec(self)?,
        })
    }
}
