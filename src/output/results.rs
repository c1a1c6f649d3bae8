use crate::state::Page;
use crate::PagesweepError;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Builds the result file name for a run saved at `unix_millis`
pub fn results_file_name(unix_millis: i64) -> String {
    format!("scrape-results-{}.json", unix_millis)
}

/// Saves pages as pretty-printed JSON in `directory`
///
/// The file is named after the current time in Unix milliseconds; the
/// directory is created if needed.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(PagesweepError)` - Nothing to save, or the file could not be written
pub fn save_results(directory: &Path, pages: &[Page]) -> crate::Result<PathBuf> {
    save_results_at(directory, pages, Utc::now().timestamp_millis())
}

/// Saves pages using an explicit timestamp for the file name
pub fn save_results_at(
    directory: &Path,
    pages: &[Page],
    unix_millis: i64,
) -> crate::Result<PathBuf> {
    if pages.is_empty() {
        return Err(PagesweepError::Output(
            "cannot save results: no pages provided".to_string(),
        ));
    }

    std::fs::create_dir_all(directory).map_err(|e| {
        PagesweepError::Output(format!(
            "failed to create output directory {}: {}",
            directory.display(),
            e
        ))
    })?;

    let path = directory.join(results_file_name(unix_millis));
    let data = serde_json::to_string_pretty(pages)?;

    std::fs::write(&path, data).map_err(|e| {
        PagesweepError::Output(format!("failed to write {}: {}", path.display(), e))
    })?;

    tracing::info!("Saved {} results to {}", pages.len(), path.display());
    Ok(path)
}
