// src/pipeline/extract.rs

//! Text and link extraction from fetched HTML.
//!
//! Produces the two inputs the rest of the pipeline works on: the visible
//! text of the page (whitespace-normalized, script/style content skipped)
//! and the raw anchor hrefs in document order.

use scraper::{Html, Node, Selector};

use crate::error::{AppError, Result};

/// Parsed page content.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Visible text with single-space separators
    pub text: String,
    /// Raw `a[href]` attribute values, document order, unresolved
    pub hrefs: Vec<String>,
}

/// Parse raw page bytes into visible text and anchor hrefs.
///
/// Content is decoded as UTF-8 with replacement; the external fetcher
/// hands over raw bytes and transfer-encoding concerns stay on its side.
pub fn extract(content: &[u8]) -> Result<Extraction> {
    let html = String::from_utf8_lossy(content);
    let document = Html::parse_document(&html);

    let link_sel = parse_selector("a[href]")?;
    let hrefs = document
        .select(&link_sel)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect();

    Ok(Extraction {
        text: visible_text(&document),
        hrefs,
    })
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collect the text nodes of a document, skipping non-rendered elements,
/// into one whitespace-normalized string.
fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => {
                    matches!(el.name(), "script" | "style" | "noscript" | "template")
                }
                _ => false,
            });
            if hidden {
                continue;
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }

    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
