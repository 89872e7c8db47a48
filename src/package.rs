//! The packaging pipeline: locate, bundle, persist, hash, assemble.
//!
//! One invocation produces exactly one terminal outcome: a `PackagingResult`
//! describing the persisted artifact, or a `PackagingError`. Nothing is
//! retried and no state is shared between invocations; concurrent callers
//! are isolated by their own component/publish path pairs.

use crate::manifest::PackagingRequest;
use crate::{bundle, diagnostics, emit, hash, locate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The manifest entry for a packaged data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingResult {
    /// Runtime dialect of the compiled artifact.
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Basename of the compiled artifact inside the publish directory.
    pub src: String,
    /// Content hash of the exact bytes written to `publishPath/src`.
    pub hash_key: String,
}

/// Everything that can go wrong while packaging. Closed set; callers never
/// see the bundler's raw error shape.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The manifest's declared data file is absent from the component.
    #[error("server script \"{script}\" not found in component")]
    ScriptNotFound { script: String },

    /// The script failed to parse or transform. The diagnostic's position
    /// refers to the original source text.
    #[error("syntax error in {file}: {diagnostic}")]
    Syntax {
        file: String,
        diagnostic: diagnostics::Diagnostic,
    },

    /// The bundling capability failed for a reason other than a syntax
    /// error.
    #[error("bundling failed for {file}: {reason}")]
    Bundler { file: String, reason: String },

    /// Persisting the compiled artifact failed. No partial file remains.
    #[error("failed to write compiled artifact {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Package a component's server-side data provider.
///
/// Reads `componentPath/manifest.files.data` (the bundler reads nothing else
/// in the current pipeline), writes exactly one file on success —
/// `publishPath/basename(manifest.files.data)` — and returns its manifest
/// entry. On failure nothing is written.
pub async fn package(request: PackagingRequest) -> Result<PackagingResult, PackagingError> {
    let script_path = locate::resolve_data_script(&request.component_path, &request.manifest).await?;
    let file_name = artifact_file_name(&request.manifest.files.data)?;

    let source = tokio::fs::read_to_string(&script_path)
        .await
        .map_err(|err| PackagingError::Bundler {
            file: file_name.clone(),
            reason: format!("could not read {}: {err}", script_path.display()),
        })?;

    log::debug!("bundling {file_name} for {}", request.bundler.target.as_str());
    let output = match bundle::bundle_script(&source, &file_name, &request.bundler) {
        Ok(output) => output,
        Err(failure) => {
            let diagnostic = diagnostics::from_parser_errors(&source, &failure.diagnostics);
            return Err(PackagingError::Syntax {
                file: file_name,
                diagnostic,
            });
        }
    };

    let destination = request.publish_path.join(&file_name);
    emit::write_artifact(&destination, output.code.as_bytes())
        .await
        .map_err(|source| PackagingError::Write {
            path: destination.clone(),
            source,
        })?;

    // The key must reflect the artifact exactly as persisted, so it is
    // derived from the same bytes handed to the writer.
    let hash_key = hash::from_string(&output.code);

    Ok(PackagingResult {
        artifact_type: request.bundler.target.as_str().to_string(),
        src: file_name,
        hash_key,
    })
}

/// Basename of the declared data file; the artifact keeps the source's name
/// regardless of how deep the manifest points into the component.
fn artifact_file_name(declared: &str) -> Result<String, PackagingError> {
    Path::new(declared)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| PackagingError::ScriptNotFound {
            script: declared.to_string(),
        })
}
