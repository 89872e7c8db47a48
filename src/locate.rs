//! Resolution of the component's declared data-provider script.

use crate::manifest::ComponentManifest;
use crate::package::PackagingError;
use std::path::{Path, PathBuf};

/// Resolve the on-disk path of the manifest's declared data script.
///
/// Fails fast with `ScriptNotFound` when the file is absent; the only side
/// effect is the existence check itself.
pub async fn resolve_data_script(
    component_path: &Path,
    manifest: &ComponentManifest,
) -> Result<PathBuf, PackagingError> {
    let declared = &manifest.files.data;
    let script_path = component_path.join(declared);

    match tokio::fs::try_exists(&script_path).await {
        Ok(true) => {
            log::debug!("resolved data script {}", script_path.display());
            Ok(script_path)
        }
        _ => Err(PackagingError::ScriptNotFound {
            script: declared.clone(),
        }),
    }
}
