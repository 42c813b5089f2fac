use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::WorkflowError;

/// Report the files already present in `path`.
///
/// A missing directory produces no output and returns `Ok(None)`. Otherwise
/// the sorted entry names are returned, and printed under a heading when there
/// is at least one.
pub async fn inspect_directory<W: Write>(
    path: &Path,
    out: &mut W,
) -> Result<Option<Vec<String>>, WorkflowError> {
    if !path.exists() {
        debug!(path = %path.display(), "Patch directory does not exist");
        return Ok(None);
    }

    let inspect_err = |source| WorkflowError::Inspect {
        path: path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(path).await.map_err(inspect_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(inspect_err)? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    if !names.is_empty() {
        writeln!(out)?;
        writeln!(out, "Some files already exist:")?;
        for name in &names {
            writeln!(out, "{}", name.yellow())?;
        }
    }

    debug!(path = %path.display(), entries = names.len(), "Inspected patch directory");

    Ok(Some(names))
}
