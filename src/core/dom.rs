//! Heading-based navigation over a parsed page.
//!
//! The pages carry no ids or classes worth relying on, so every region is
//! found by a heading's text and then a fixed walk of parent and sibling
//! steps. These helpers keep that walk explicit; a missing step is a
//! `StructureError`, never a silent default.

use crate::core::rules::normalize_whitespace;
use crate::utils::error::{ReportError, Result};
use scraper::{ElementRef, Html, Selector};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ReportError::ConfigError {
        message: format!("invalid selector {:?}: {}", css, e),
    })
}

/// Whitespace-normalized, trimmed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// First `<h2>` whose text equals `title`.
pub fn heading_exact<'a>(document: &'a Html, title: &str) -> Result<Option<ElementRef<'a>>> {
    let h2 = selector("h2")?;
    Ok(document
        .select(&h2)
        .find(|heading| element_text(*heading) == title))
}

/// First `<h2>` whose text starts with `prefix`.
pub fn heading_prefix<'a>(document: &'a Html, prefix: &str) -> Result<Option<ElementRef<'a>>> {
    let h2 = selector("h2")?;
    Ok(document
        .select(&h2)
        .find(|heading| element_text(*heading).starts_with(prefix)))
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// First descendant matching `css`.
pub fn find_first<'a>(element: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(element.select(&sel).next())
}

/// Turn a missing navigation step into a `StructureError` naming the step.
pub fn require<'a>(element: Option<ElementRef<'a>>, what: &str) -> Result<ElementRef<'a>> {
    element.ok_or_else(|| ReportError::structure(what))
}
