//! Request and configuration types for the packaging pipeline.
//!
//! Mirrors the component manifest shape the hosting platform hands to the
//! packager: a component directory, a publish directory, the declared
//! data-provider filename, and the bundler knobs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One packaging invocation. Fully owned so concurrent invocations for
/// different components share nothing.
#[derive(Debug, Clone)]
pub struct PackagingRequest {
    /// Root directory of the component being packaged.
    pub component_path: PathBuf,
    /// Directory the compiled artifact is written into. Must exist and be
    /// writable; the packager never creates it.
    pub publish_path: PathBuf,
    /// The component's manifest entry.
    pub manifest: ComponentManifest,
    /// Bundler configuration.
    pub bundler: BundlerOptions,
}

/// The subset of the component manifest the packager consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentManifest {
    pub files: ManifestFiles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFiles {
    /// Filename of the server-side data provider, relative to the component
    /// root (e.g. `"server.js"` or `"src/server.js"`).
    pub data: String,
}

/// Explicit bundler configuration. The supported options are enumerated here
/// rather than composed at runtime; the adapter consumes this structure and
/// nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundlerOptions {
    /// Strip whitespace from the generated artifact.
    pub minify: bool,
    /// Runtime dialect of the compiled artifact.
    pub target: TargetDialect,
    /// Verbosity of the adapter's bundling summary.
    pub stats: StatsLevel,
}

impl Default for BundlerOptions {
    fn default() -> Self {
        Self {
            minify: true,
            target: TargetDialect::NodeJs,
            stats: StatsLevel::None,
        }
    }
}

/// Runtime dialect identifier carried into the packaged manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetDialect {
    #[serde(rename = "node.js")]
    NodeJs,
}

impl TargetDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetDialect::NodeJs => "node.js",
        }
    }
}

impl Default for TargetDialect {
    fn default() -> Self {
        TargetDialect::NodeJs
    }
}

/// How chatty the bundler adapter is about a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsLevel {
    #[default]
    None,
    Normal,
    Verbose,
}
