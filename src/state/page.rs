/// Result record for a single scraped URL
///
/// A `Page` is produced for every URL handed to the runner, whether the
/// scrape succeeded or not. The `error` field is the only success signal.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of scraping one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// The URL as it was submitted
    pub url: String,

    /// Text of the first `<title>` element, trimmed (empty if none)
    pub title: String,

    /// `href` values of all anchors, in document order
    pub links: Vec<String>,

    /// `src` values of all images, in document order
    pub images: Vec<String>,

    /// When the record was finalized
    pub timestamp: DateTime<Utc>,

    /// Failure description, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Page {
    /// Creates a successful page record stamped with the current time
    pub fn success(
        url: impl Into<String>,
        title: impl Into<String>,
        links: Vec<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            links,
            images,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Creates a failed page record stamped with the current time
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            links: Vec::new(),
            images: Vec::new(),
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Returns true if scraping this page encountered an error
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Returns true if this page was scraped without errors
    pub fn is_success(&self) -> bool {
        !self.has_error()
    }
}
