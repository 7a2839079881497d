use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::archive::{Compression, Manifest, DEFAULT_OUTPUT};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Archive written by `extract` when no `--output` is given
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Compression for class entries (default: deflated)
    #[serde(default)]
    pub compression: Compression,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            compression: Compression::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestConfig {
    /// Value of `Manifest-Version`
    #[serde(default = "default_manifest_version")]
    pub version: String,

    /// Extra main-section attributes. Replaces the default set when present.
    #[serde(default = "default_manifest_attributes")]
    pub attributes: BTreeMap<String, String>,
}

fn default_manifest_version() -> String {
    "1.0".to_string()
}

fn default_manifest_attributes() -> BTreeMap<String, String> {
    BTreeMap::from([("Clazz".to_string(), "ClassExtractor".to_string())])
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            version: default_manifest_version(),
            attributes: default_manifest_attributes(),
        }
    }
}

impl From<&ManifestConfig> for Manifest {
    fn from(config: &ManifestConfig) -> Self {
        config
            .attributes
            .iter()
            .fold(Manifest::new(config.version.clone()), |manifest, (name, value)| {
                manifest.with_attribute(name.clone(), value.clone())
            })
    }
}
