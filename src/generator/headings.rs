use ::html2md::{Handle, StructuredPrinter, TagHandler};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How headings are written in the generated Markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// `## Title`
    #[default]
    Atx,
    /// `## Title ##`
    AtxClosed,
    /// Underlined with `=` or `-`; levels past 2 fall back to ATX.
    #[serde(alias = "underlined")]
    Setext,
}

impl FromStr for HeadingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atx" => Ok(HeadingStyle::Atx),
            "atx_closed" | "atx-closed" => Ok(HeadingStyle::AtxClosed),
            "setext" | "underlined" => Ok(HeadingStyle::Setext),
            other => Err(format!("unknown heading style: {}", other)),
        }
    }
}

impl fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeadingStyle::Atx => "atx",
            HeadingStyle::AtxClosed => "atx_closed",
            HeadingStyle::Setext => "setext",
        };
        f.write_str(name)
    }
}

/// Writes `<h1>`..`<h6>` in the configured style.
///
/// The children are rendered first, then the collected text is collapsed onto
/// one line and wrapped in the heading markers. Headings without text are
/// dropped.
pub struct HeadingHandler {
    level: usize,
    style: HeadingStyle,
    start: usize,
}

impl HeadingHandler {
    pub fn new(level: usize, style: HeadingStyle) -> Self {
        HeadingHandler {
            level: level.clamp(1, 6),
            style,
            start: 0,
        }
    }
}

impl TagHandler for HeadingHandler {
    fn handle(&mut self, _tag: &Handle, printer: &mut StructuredPrinter) {
        printer.insert_newline();
        printer.insert_newline();
        self.start = printer.data.len();
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        if self.start > printer.data.len() || !printer.data.is_char_boundary(self.start) {
            return;
        }
        let content = printer.data.split_off(self.start);
        let text = content.split_whitespace().collect::<Vec<&str>>().join(" ");
        if text.is_empty() {
            return;
        }
        printer.append_str(&render(self.level, &text, self.style));
        printer.insert_newline();
        printer.insert_newline();
    }
}

/// Writes `<hr>` as a rule set off by blank lines, so it can never read as a
/// setext underline of the preceding text.
#[derive(Default)]
pub struct RuleHandler;

impl TagHandler for RuleHandler {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        printer.append_str("\n\n---\n\n");
    }
}

pub fn render(level: usize, text: &str, style: HeadingStyle) -> String {
    let hashes = "#".repeat(level);
    match style {
        HeadingStyle::Setext if level <= 2 => {
            let underline = if level == 1 { "=" } else { "-" };
            format!("{}\n{}", text, underline.repeat(text.chars().count()))
        }
        HeadingStyle::AtxClosed => format!("{} {} {}", hashes, text, hashes),
        HeadingStyle::Atx | HeadingStyle::Setext => format!("{} {}", hashes, text),
    }
}
