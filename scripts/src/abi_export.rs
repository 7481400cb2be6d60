//! Export of contract ABIs from compilation artifacts

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    artifacts::ContractArtifact, config::AbiExporterConfig, constants::JSON_EXTENSION,
    errors::ScriptError,
};

/// Write the ABI of every artifact to the export directory, returning the written paths
///
/// Artifacts with an empty ABI are skipped. In flat mode two artifacts with the same
/// contract name would overwrite each other, so that is an error.
pub fn export_abis(
    artifacts: &[ContractArtifact],
    settings: &AbiExporterConfig,
) -> Result<Vec<PathBuf>, ScriptError> {
    let exported: Vec<&ContractArtifact> =
        artifacts.iter().filter(|a| !a.abi.is_empty()).collect();

    if settings.flat {
        let duplicates: Vec<&str> = exported
            .iter()
            .map(|a| a.contract_name.as_str())
            .duplicates()
            .collect();
        if !duplicates.is_empty() {
            return Err(ScriptError::WriteFile(format!(
                "duplicate output destination for {}",
                duplicates.join(", ")
            )));
        }
    }

    if settings.clear && settings.path.exists() {
        debug!("Clearing {}", settings.path.display());
        fs::remove_dir_all(&settings.path)
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", settings.path.display(), e)))?;
    }

    let mut written = Vec::with_capacity(exported.len());
    for artifact in exported {
        let dest = abi_destination(artifact, &settings.path, settings.flat);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScriptError::WriteFile(format!("{}: {}", parent.display(), e)))?;
        }

        let contents = serde_json::to_string_pretty(&artifact.abi)
            .map_err(|e| ScriptError::Serde(e.to_string()))?;
        fs::write(&dest, contents)
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", dest.display(), e)))?;

        written.push(dest);
    }

    info!(
        "Exported {} ABIs to {}",
        written.len(),
        settings.path.display()
    );
    Ok(written)
}

/// The file an artifact's ABI is written to
fn abi_destination(artifact: &ContractArtifact, dir: &Path, flat: bool) -> PathBuf {
    let file_name = format!("{}.{}", artifact.contract_name, JSON_EXTENSION);
    if flat {
        dir.join(file_name)
    } else {
        dir.join(&artifact.source_name).join(file_name)
    }
}
