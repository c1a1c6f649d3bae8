use crate::PagesweepError;
use std::path::Path;

/// Loads the list of URLs to scrape from a JSON array file
///
/// A missing file is created containing `[]`, and an empty list is returned.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The URLs in file order
/// * `Err(PagesweepError)` - The file could not be read, created or parsed
pub fn load_urls(path: &Path) -> crate::Result<Vec<String>> {
    let source_error = |message: String| PagesweepError::UrlSource {
        path: path.display().to_string(),
        message,
    };

    if !path.exists() {
        tracing::info!("URL file {} not found, creating an empty one", path.display());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| source_error(e.to_string()))?;
            }
        }
        std::fs::write(path, "[]").map_err(|e| source_error(e.to_string()))?;
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| source_error(e.to_string()))?;
    let urls: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| source_error(format!("invalid JSON: {}", e)))?;

    tracing::debug!("Loaded {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}
