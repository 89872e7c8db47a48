//! # Component Server-Script Packager
//!
//! Packages a component's server-side data provider for the hosting
//! platform: resolve the declared script, bundle it into a single
//! node-compatible file, persist it to the publish directory, and derive the
//! content hash the platform uses for caching and versioning.
//!
//! The pipeline is a single sequential pass per invocation:
//!
//! locate → bundle → (write → hash → assemble) | (translate error → fail)
//!
//! Failures carry positions in the *original* source text, so a component
//! author can find the offending construct from the message alone.

mod bundle;
mod diagnostics;
mod emit;
pub mod hash;
mod locate;
mod manifest;
mod package;

pub use diagnostics::Diagnostic;
pub use manifest::{
    BundlerOptions, ComponentManifest, ManifestFiles, PackagingRequest, StatsLevel, TargetDialect,
};
pub use package::{package, PackagingError, PackagingResult};

#[cfg(test)]
mod packager_tests;
