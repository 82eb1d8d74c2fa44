use std::fs;
use std::path::Path;

use markappend::{
    ConvertOptions, Error, HeadingStyle, HtmlSource, Settings, Stage, convert, convert_html, run,
    run_with_sink,
};
use tempfile::TempDir;

fn settings_in(dir: &TempDir, html: &str) -> Settings {
    let input = dir.path().join("consumindo.html");
    fs::write(&input, html).unwrap();
    Settings {
        input_path: input,
        output_path: dir.path().join("pagina3.md"),
        ..Settings::default()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn title_and_bold_are_appended() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "<h1>Title</h1><p>Hello <b>world</b></p>");

    let report = run(&settings).unwrap();

    let output = read(&settings.output_path);
    let lines: Vec<&str> = output.lines().collect();
    let title = lines.iter().position(|l| *l == "# Title").expect("ATX title line");
    assert!(lines[title + 1..].iter().any(|l| l.contains("Hello **world**")), "{output:?}");
    assert_eq!(report.bytes_written, output.len());
    assert_eq!(report.bytes_read, 39);
}

#[test]
fn existing_content_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "<h2>Sub</h2>");
    fs::write(&settings.output_path, "existing content\n").unwrap();

    run(&settings).unwrap();
    let once = read(&settings.output_path);
    let converted = once.strip_prefix("existing content\n").expect("prefix kept");
    assert!(converted.contains("## Sub"));

    run(&settings).unwrap();
    assert_eq!(read(&settings.output_path), format!("{once}{converted}"));
}

#[test]
fn sub_heading_is_atx() {
    let markdown = convert_html("<h2>Sub</h2>", &ConvertOptions::default()).unwrap();
    assert!(markdown.lines().any(|l| l == "## Sub"), "{markdown:?}");
    assert!(!markdown.lines().any(|l| l.starts_with("---")));
}

#[test]
fn missing_input_leaves_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("pagina3.md");
    fs::write(&output, "existing content\n").unwrap();
    let settings = Settings {
        input_path: dir.path().join("absent.html"),
        output_path: output.clone(),
        ..Settings::default()
    };

    let err = run(&settings).unwrap_err();
    assert_eq!(err.stage(), Stage::Read);
    assert!(err.is_input_missing());
    assert_eq!(read(&output), "existing content\n");
}

#[test]
fn missing_input_never_creates_output() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        input_path: dir.path().join("absent.html"),
        output_path: dir.path().join("pagina3.md"),
        ..Settings::default()
    };
    assert!(run(&settings).is_err());
    assert!(!settings.output_path.exists());
}

#[test]
fn empty_input_appends_whitespace_only() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "");

    run(&settings).unwrap();
    assert!(settings.output_path.exists());
    assert!(read(&settings.output_path).trim().is_empty());
}

#[test]
fn non_ascii_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "<p>café com pão</p>");

    run(&settings).unwrap();
    let bytes = fs::read(&settings.output_path).unwrap();
    let needle = "café com pão".as_bytes();
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn invalid_utf8_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.html");
    fs::write(&input, b"<p>caf\xe9</p>").unwrap();
    let settings = Settings {
        input_path: input,
        output_path: dir.path().join("pagina3.md"),
        ..Settings::default()
    };

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(err.stage(), Stage::Read);
    assert!(!settings.output_path.exists());
}

#[test]
fn missing_output_directory_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(&dir, "<p>x</p>");
    settings.output_path = dir.path().join("downloads").join("pagina3.md");

    let err = run(&settings).unwrap_err();
    assert_eq!(err.stage(), Stage::Write);

    settings.create_output_dir = true;
    run(&settings).unwrap();
    assert!(read(&settings.output_path).contains('x'));
}

#[test]
fn injected_sink_receives_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "<h1>Title</h1>");
    let mut captured = String::new();

    let report = run_with_sink(&settings, &mut captured).unwrap();

    assert!(captured.lines().any(|l| l == "# Title"));
    assert_eq!(report.output, "memory");
    assert!(!settings.output_path.exists());
}

#[test]
fn bad_selector_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(&dir, "<p>x</p>");
    settings.conversion.selector = Some("p[".to_string());

    let err = run(&settings).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert!(!settings.output_path.exists());
}

#[test]
fn selector_limits_conversion() {
    let options = ConvertOptions {
        selector: Some("article".to_string()),
        ..ConvertOptions::default()
    };
    let html = "<nav><a href=\"/\">Home</a></nav><article><h2>Sub</h2><p>Body</p></article>";
    let markdown = convert_html(html, &options).unwrap();
    assert!(markdown.lines().any(|l| l == "## Sub"));
    assert!(markdown.contains("Body"));
    assert!(!markdown.contains("Home"));
}

#[test]
fn closed_style_from_options() {
    let options = ConvertOptions {
        heading_style: HeadingStyle::AtxClosed,
        ..ConvertOptions::default()
    };
    let markdown = convert(&HtmlSource::from("<h2>Sub</h2>"), &options).unwrap();
    assert!(markdown.lines().any(|l| l == "## Sub ##"), "{markdown:?}");
}

#[test]
fn unnormalized_html_still_converts() {
    let options = ConvertOptions {
        normalize: false,
        ..ConvertOptions::default()
    };
    let markdown = convert_html("<h1>Title</h1><p>Hello <b>world</b>", &options).unwrap();
    assert!(markdown.lines().any(|l| l == "# Title"));
    assert!(markdown.contains("Hello **world**"));
}

#[test]
fn converts_straight_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir, "<h1>Title</h1>");
    let markdown =
        markappend::convert_from_path(&settings.input_path, &settings.conversion).unwrap();
    assert!(markdown.lines().any(|l| l == "# Title"));

    let sink = markappend::FileSink::new(&settings.output_path);
    assert_eq!(sink.path(), settings.output_path.as_path());
}

#[test]
fn rule_between_inline_text_is_not_a_heading() {
    let markdown =
        convert_html("<div>Intro text<hr>More</div>", &ConvertOptions::default()).unwrap();
    assert!(!markdown.lines().any(|l| l.starts_with("## ")), "{markdown:?}");
    assert!(markdown.lines().any(|l| l == "---"), "{markdown:?}");
}

#[test]
fn empty_title_leaves_no_underline() {
    let markdown = convert_html("<h1></h1><p>Body</p>", &ConvertOptions::default()).unwrap();
    assert!(!markdown.contains("=="), "{markdown:?}");
    assert!(markdown.contains("Body"));
}
