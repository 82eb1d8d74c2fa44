use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use ::html2md::TagHandlerFactory;
use tracing::debug;

use crate::error::{Error, Result};
use crate::generator::headings::{HeadingHandler, HeadingStyle, RuleHandler};

type Factories = HashMap<String, Box<dyn TagHandlerFactory>>;

pub fn run(html: &str, style: HeadingStyle) -> Result<String> {
    let markdown = convert_with(html, &factories(style))?;
    debug!(html_len = html.len(), markdown_len = markdown.len(), "converted html");
    Ok(markdown)
}

/// Heading and rule handlers replacing html2md's built-in ones.
fn factories(style: HeadingStyle) -> Factories {
    let mut factories: Factories = HashMap::new();
    for level in 1..=6 {
        factories.insert(
            format!("h{}", level),
            Box::new(move || HeadingHandler::new(level, style)),
        );
    }
    factories.insert("hr".to_string(), Box::new(RuleHandler::default));
    factories
}

// A panic inside html2md is returned as Error::Convert. The default panic hook
// still prints its message to stderr before the unwind is caught.
fn convert_with(html: &str, factories: &Factories) -> Result<String> {
    panic::catch_unwind(AssertUnwindSafe(|| ::html2md::parse_html_custom(html, factories)))
        .map_err(|payload| Error::Convert(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "converter panicked".to_string()
    }
}
