use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::persistence::http::DEFAULT_API_URL;
use crate::sandbox::packager::{SandboxOptions, DEFINE_ENDPOINT};

/// Environment variable naming the saved-forms service.
pub const API_URL_ENV: &str = "FORM_BUILDER_API_URL";

const DEFAULT_CONFIG_PATH: &str = "form-builder.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-builder",
    version,
    about = "Assemble forms from typed blocks and export them as JSON or React source"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Form document to edit
    #[arg(short, long, global = true, default_value = "form.json")]
    pub file: String,

    /// Saved-forms service base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to config file (default: form-builder.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drop a new element onto the canvas or into a row column
    Add {
        /// Palette type tag (text, select, twoColumnRow, ...)
        #[arg(long = "type")]
        element_type: String,

        /// Drop target: form-canvas or <rowId>-column-<index>
        #[arg(long, default_value = "form-canvas")]
        target: String,
    },

    /// Remove an element (rows are removed with their contents)
    Remove {
        #[arg(long)]
        id: String,
    },

    /// Change an element's caption
    Rename {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,
    },

    /// Set one property; the value is read as JSON, falling back to text
    Set {
        #[arg(long)]
        id: String,

        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,
    },

    /// Edit the options of a radio, select or checkbox element
    Options {
        #[arg(long)]
        id: String,

        #[command(subcommand)]
        action: OptionAction,
    },

    /// Replace the document with an imported one (validated and normalized)
    Import {
        /// JSON document to read
        #[arg(long)]
        input: String,
    },

    /// Print a text outline of the form
    Outline,

    /// Print the flat field list that would be saved
    Flatten,

    /// Generate React source for the form
    Generate {
        /// javascript or typescript
        #[arg(long)]
        language: Option<String>,

        /// Form name, used for the component name
        #[arg(long)]
        name: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Package generated source for the online sandbox
    Sandbox {
        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// Print the decoded manifest instead of the URL
        #[arg(long)]
        inspect: bool,
    },

    /// Manage saved forms
    Forms {
        #[command(subcommand)]
        action: FormsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum OptionAction {
    /// Append `Option N`
    Add,

    /// Change the text (or checkbox label) at an index
    Change {
        #[arg(long)]
        index: usize,

        #[arg(long)]
        value: String,
    },

    /// Tick or untick a checkbox option
    Check {
        #[arg(long)]
        index: usize,

        #[arg(long, action = clap::ArgAction::Set)]
        checked: bool,
    },

    /// Delete the option at an index
    Delete {
        #[arg(long)]
        index: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum FormsCommand {
    /// List saved forms
    List,

    /// Show one saved form as an outline
    Get {
        #[arg(long)]
        id: String,
    },

    /// Save the document (creates a form, or updates --id)
    Save {
        #[arg(long)]
        name: String,

        #[arg(long)]
        id: Option<String>,
    },

    /// Load a saved form into the document
    Load {
        #[arg(long)]
        id: String,
    },

    /// Copy a saved form
    Duplicate {
        #[arg(long)]
        id: String,

        /// Name of the copy (default: "<name> copy")
        #[arg(long)]
        name: Option<String>,
    },

    /// Rename a saved form
    Rename {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,
    },

    /// Delete a saved form
    Delete {
        #[arg(long)]
        id: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-builder.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,

    /// Request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub form_name: Option<String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            form_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_react_version")]
    pub react_version: String,

    #[serde(default = "default_mui_version")]
    pub mui_version: String,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            react_version: default_react_version(),
            mui_version: default_mui_version(),
        }
    }
}

impl SandboxConfig {
    pub fn options(&self) -> SandboxOptions {
        SandboxOptions {
            endpoint: self.endpoint.clone(),
            react_version: self.react_version.clone(),
            mui_version: self.mui_version.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_trace_path(),
        }
    }
}

// Serde default helpers
fn default_language() -> String { "javascript".to_string() }
fn default_endpoint() -> String { DEFINE_ENDPOINT.to_string() }
fn default_react_version() -> String { SandboxOptions::default().react_version }
fn default_mui_version() -> String { SandboxOptions::default().mui_version }
fn default_trace_path() -> String { "form_edits.jsonl".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Warning: ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Setting resolution (CLI > config file > environment > defaults)
// ============================================================================

pub fn resolve_api_url(cli_value: Option<&str>, config: &AppConfig) -> String {
    cli_value
        .map(str::to_string)
        .or_else(|| config.api.url.clone())
        .or_else(|| std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Language name from the command line, else the config file.
pub fn resolve_language<'a>(cli_value: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    cli_value.unwrap_or(config.codegen.language.as_str())
}

/// Form name from the command line, else the config file, else empty.
pub fn resolve_form_name<'a>(cli_value: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    cli_value
        .or(config.codegen.form_name.as_deref())
        .unwrap_or("")
}
