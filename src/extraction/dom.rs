//! DOM lookups over a parsed page
//!
//! Sites that ship CSS modules append a build hash to every class name
//! (`Feed_body_3R0rO`), so those elements can only be found by class prefix.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractionError, Result};

/// Parse a full HTML document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{css}: {e}")).into())
}

/// First element matching a CSS selector, in document order
pub fn first_match<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).next())
}

/// Whether any class token on the element starts with `prefix`
pub fn has_class_prefix(el: &ElementRef<'_>, prefix: &str) -> bool {
    el.value().classes().any(|class| class.starts_with(prefix))
}

/// Every `tag` element carrying a class token that starts with `prefix`
pub fn all_with_class_prefix<'a>(
    doc: &'a Html,
    tag: &str,
    prefix: &str,
) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(tag)?;
    Ok(doc
        .select(&sel)
        .filter(|el| has_class_prefix(el, prefix))
        .collect())
}

/// First `tag` element carrying a class token that starts with `prefix`
pub fn first_with_class_prefix<'a>(
    doc: &'a Html,
    tag: &str,
    prefix: &str,
) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(tag)?;
    Ok(doc.select(&sel).find(|el| has_class_prefix(el, prefix)))
}

/// First descendant of `el` matching a CSS selector
pub fn first_descendant<'a>(el: &ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(el.select(&sel).next())
}

/// Elements whose text is never rendered as page content
const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

fn push_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !NON_CONTENT_TAGS.contains(&child.value().name()) {
                push_text(child, out);
            }
        }
    }
}

/// Descendant text concatenated and trimmed, skipping script and style bodies
pub fn element_text(el: &ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(*el, &mut out);
    out.trim().to_string()
}
