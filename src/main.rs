use clap::{Arg, ArgAction, Command};
use markappend::config::{CliOverrides, Settings};
use markappend::{HeadingStyle, WriterSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("markappend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts an HTML file to Markdown and appends it to an output file")
        .arg(
            Arg::new("input")
                .help("Input HTML file (defaults to the configured input_path)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Markdown file to append to"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Extra TOML configuration file"),
        )
        .arg(
            Arg::new("heading-style")
                .long("heading-style")
                .value_name("STYLE")
                .value_parser(["atx", "atx_closed", "atx-closed", "setext", "underlined"])
                .help("Heading style of the generated Markdown"),
        )
        .arg(
            Arg::new("selector")
                .long("selector")
                .value_name("CSS")
                .help("Only convert elements matching this CSS selector"),
        )
        .arg(
            Arg::new("no-normalize")
                .long("no-normalize")
                .action(ArgAction::SetTrue)
                .help("Hand the HTML to the converter without re-parsing it"),
        )
        .arg(
            Arg::new("create-dirs")
                .long("create-dirs")
                .action(ArgAction::SetTrue)
                .help("Create the output directory when it is missing"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .action(ArgAction::SetTrue)
                .help("Write the Markdown to stdout instead of the output file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log progress to stderr"),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config_file = matches.get_one::<String>("config").map(PathBuf::from);
    let mut settings = match Settings::load(config_file.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let heading_style = matches
        .get_one::<String>("heading-style")
        .and_then(|style| style.parse::<HeadingStyle>().ok());

    settings.apply_cli_overrides(CliOverrides {
        input_path: matches.get_one::<String>("input").map(PathBuf::from),
        output_path: matches.get_one::<String>("output").map(PathBuf::from),
        heading_style,
        selector: matches.get_one::<String>("selector").cloned(),
        normalize: matches.get_flag("no-normalize").then_some(false),
        create_output_dir: matches.get_flag("create-dirs").then_some(true),
    });

    let result = if matches.get_flag("stdout") {
        let mut sink = WriterSink::new(std::io::stdout().lock());
        markappend::run_with_sink(&settings, &mut sink)
    } else {
        markappend::run(&settings)
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
