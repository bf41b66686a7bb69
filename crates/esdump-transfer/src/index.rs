//! Index definition operations: export, import and delete

use crate::backend::SearchBackend;
use crate::error::{Result, TransferError};
use esdump_common::mapping;
use std::path::Path;
use tracing::info;

/// Write the index definition (aliases, mappings, settings) to `file` verbatim.
pub async fn dump_mapping(backend: &dyn SearchBackend, index: &str, file: &Path) -> Result<()> {
    let definition = backend.get_index(index).await?;
    tokio::fs::write(file, definition.as_bytes())
        .await
        .map_err(|e| TransferError::file(file.display().to_string(), e))?;

    info!(index = %index, path = %file.display(), "Index definition exported");
    Ok(())
}

/// Create `index` from an exported definition file.
///
/// Server-assigned settings are stripped first. With `delete_first` an
/// existing index of the same name is dropped before creation.
pub async fn load_mapping(
    backend: &dyn SearchBackend,
    index: &str,
    file: &Path,
    delete_first: bool,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| TransferError::file(file.display().to_string(), e))?;
    let definition = mapping::sanitize(&raw)?;

    if delete_first {
        delete_index(backend, index).await?;
    }

    backend.create_index(index, &definition).await?;

    info!(index = %index, path = %file.display(), "Index created from definition");
    Ok(())
}

/// Delete `index`. A missing index is not an error.
///
/// # Returns
/// `true` if an index was deleted, `false` if none existed.
pub async fn delete_index(backend: &dyn SearchBackend, index: &str) -> Result<bool> {
    match backend.delete_index(index).await {
        Ok(_) => {
            info!(index = %index, "Index deleted");
            Ok(true)
        }
        Err(err) if err.is_index_not_found() => {
            info!(index = %index, "Index does not exist, nothing to delete");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
