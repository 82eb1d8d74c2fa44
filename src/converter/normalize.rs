use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Parses `html` and serializes it back, repairing unbalanced markup on the way.
///
/// Without a selector the contents of `<body>` are returned. With one, the
/// outer HTML of every matching element is returned in document order.
pub fn normalize(html: &str, selector: Option<&str>) -> Result<String> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(recovered = document.errors.len(), "html parser recovered from errors");
    }

    match selector {
        Some(selector) => select(&document, selector),
        None => Ok(body(&document)),
    }
}

fn body(document: &Html) -> String {
    document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

fn select(document: &Html, selector: &str) -> Result<String> {
    let parsed = Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })?;

    let fragments: Vec<String> = document.select(&parsed).map(|el| el.html()).collect();
    if fragments.is_empty() {
        warn!(selector, "selector matched nothing");
    }
    Ok(fragments.join("\n"))
}
