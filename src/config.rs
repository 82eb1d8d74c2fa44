//! Layered configuration
//! Settings are read, in increasing priority, from the built-in `Config.toml`,
//! a `Config.toml` next to the executable, an explicit file, `MARKAPPEND_*`
//! environment variables and finally command-line overrides.
//! Usage:
//! ```rust,no_run
//! use markappend::config::Settings;
//! let settings = Settings::new().expect("configuration");
//! println!("{:?}", settings.output_path);
//! ```

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf};

use crate::error::Result;
use crate::generator::headings::HeadingStyle;

const BUILTIN: &str = include_str!("../Config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub create_output_dir: bool,
    #[serde(default)]
    pub conversion: ConvertOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub heading_style: HeadingStyle,
    /// Run the document through the HTML parser before conversion.
    pub normalize: bool,
    /// CSS selector restricting conversion to the matching elements.
    pub selector: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            heading_style: HeadingStyle::Atx,
            normalize: true,
            selector: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_path: PathBuf::from("consumindo.html"),
            output_path: PathBuf::from("downloads/pagina3.md"),
            create_output_dir: false,
            conversion: ConvertOptions::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub heading_style: Option<HeadingStyle>,
    pub selector: Option<String>,
    pub normalize: Option<bool>,
    pub create_output_dir: Option<bool>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::load_layers(exe_dir.as_deref(), config_file)
    }

    fn load_layers(exe_dir: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        // 1. built-in default config
        let mut builder = Config::builder().add_source(File::from_str(BUILTIN, FileFormat::Toml));

        // 2. Config.toml beside the executable
        if let Some(dir) = exe_dir {
            let external = dir.join("Config.toml");
            if fs::metadata(&external).is_ok() {
                builder = builder.add_source(File::from(external).required(false));
            }
        }

        // 3. explicit file
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        // 4. environment, e.g. MARKAPPEND_CONVERSION__HEADING_STYLE=setext
        builder = builder.add_source(
            Environment::with_prefix("MARKAPPEND")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.input_path {
            self.input_path = path;
        }
        if let Some(path) = overrides.output_path {
            self.output_path = path;
        }
        if let Some(style) = overrides.heading_style {
            self.conversion.heading_style = style;
        }
        if let Some(selector) = overrides.selector {
            self.conversion.selector = Some(selector);
        }
        if let Some(normalize) = overrides.normalize {
            self.conversion.normalize = normalize;
        }
        if let Some(create) = overrides.create_output_dir {
            self.create_output_dir = create;
        }
    }
}
