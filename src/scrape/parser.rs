//! HTML parser for extracting page metadata
//!
//! This module handles parsing HTML content to extract:
//! - The page title (first `<title>` element)
//! - Anchor targets (`<a href="...">`)
//! - Image sources (`<img src="...">`)

use scraper::{ElementRef, Html};
use std::char::{decode_utf16, REPLACEMENT_CHARACTER};
use thiserror::Error;

/// Leading bytes of file formats that are never HTML
const BINARY_SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "PNG image"),
    (b"GIF87a", "GIF image"),
    (b"GIF89a", "GIF image"),
    (b"\xFF\xD8\xFF", "JPEG image"),
    (b"%PDF-", "PDF document"),
    (b"PK\x03\x04", "ZIP archive"),
    (b"\x1F\x8B\x08", "gzip archive"),
];

/// Errors produced when a body cannot be read as HTML at all
///
/// Malformed markup is never an error; the parser repairs it the way a
/// browser would, stray NUL characters included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("body is {format} data, not HTML")]
    Binary { format: &'static str },
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Trimmed text of the first `<title>` element (empty if none)
    pub title: String,

    /// Non-empty `href` values of `<a>` elements, in document order
    pub links: Vec<String>,

    /// Non-empty `src` values of `<img>` elements, in document order
    pub images: Vec<String>,
}

/// Parses HTML content and extracts the title, links and images
///
/// # Extraction Rules
///
/// - Title: text of the first `<title>` in document order, trimmed
/// - Links: `href` of every `<a>`, skipping absent or empty values
/// - Images: `src` of every `<img>`, skipping absent or empty values
///
/// Attribute values are returned exactly as written; relative URLs are not
/// resolved.
///
/// # Arguments
///
/// * `body` - Raw response bytes. A UTF-8 or UTF-16 byte order mark selects
///   the encoding, otherwise UTF-8 is assumed; invalid sequences are
///   replaced, not rejected
///
/// # Returns
///
/// * `Ok(ParsedPage)` - Successfully parsed page
/// * `Err(ParseError)` - The body starts with a known binary file signature
///
/// # Example
///
/// ```
/// use pagesweep::scrape::parse_html;
///
/// let html = br#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html).unwrap();
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_html(body: &[u8]) -> Result<ParsedPage, ParseError> {
    let text = decode(body)?;
    let document = Html::parse_document(&text);

    Ok(extract(&document))
}

/// Turns the raw body into text, honoring a byte order mark
fn decode(body: &[u8]) -> Result<String, ParseError> {
    match body {
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(String::from_utf8_lossy(rest).into_owned()),
        [0xFF, 0xFE, rest @ ..] => Ok(decode_utf16_units(rest, u16::from_le_bytes)),
        [0xFE, 0xFF, rest @ ..] => Ok(decode_utf16_units(rest, u16::from_be_bytes)),
        _ => {
            if let Some(&(_, format)) = BINARY_SIGNATURES
                .iter()
                .find(|(signature, _)| body.starts_with(signature))
            {
                return Err(ParseError::Binary { format });
            }
            Ok(String::from_utf8_lossy(body).into_owned())
        }
    }
}

fn decode_utf16_units(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    let mut text: String = decode_utf16(units)
        .map(|unit| unit.unwrap_or(REPLACEMENT_CHARACTER))
        .collect();
    if bytes.len() % 2 == 1 {
        text.push(REPLACEMENT_CHARACTER);
    }
    text
}

/// Walks the whole tree depth-first, collecting title, links and images
fn extract(document: &Html) -> ParsedPage {
    let mut title: Option<String> = None;
    let mut links = Vec::new();
    let mut images = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };

        match element.value().name() {
            "title" if title.is_none() => {
                title = Some(element.text().collect::<String>().trim().to_string());
            }
            "a" => {
                if let Some(href) = non_empty_attr(element, "href") {
                    links.push(href);
                }
            }
            "img" => {
                if let Some(src) = non_empty_attr(element, "src") {
                    images.push(src);
                }
            }
            _ => {}
        }
    }

    ParsedPage {
        title: title.unwrap_or_default(),
        links,
        images,
    }
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
