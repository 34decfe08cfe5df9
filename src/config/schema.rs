/// Configuration schema and defaults for titidy.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[style]`, `[tables]`, `[stages]`, `[output]`, and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::pipeline::StyleContext;
use crate::stages::StageKind;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level titidy configuration.
///
/// Maps directly to the `~/.titidy/config.toml` and `.titidy.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TidyConfig {
    pub style: StyleConfig,
    pub tables: TablesConfig,
    pub stages: StagesConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [style]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// String repeated once per nesting level.
    pub indent: String,
    /// Longest run of blank lines kept.
    pub max_consecutive_blank_lines: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            indent: defaults::INDENT.to_string(),
            max_consecutive_blank_lines: defaults::MAX_CONSECUTIVE_BLANK_LINES,
        }
    }
}

// ---------------------------------------------------------------------------
// [tables]
// ---------------------------------------------------------------------------

/// Keyword, function-name and operator tables.
///
/// Each list replaces the built-in table wholesale when set. Use
/// `extra_function_names` to add names without restating the whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    pub keywords: Vec<String>,
    pub function_names: Vec<String>,
    /// Appended after `function_names`.
    pub extra_function_names: Vec<String>,
    pub operators: Vec<String>,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            keywords: defaults::keywords(),
            function_names: defaults::function_names(),
            extra_function_names: Vec::new(),
            operators: defaults::operators(),
        }
    }
}

// ---------------------------------------------------------------------------
// [stages]
// ---------------------------------------------------------------------------

/// Per-stage enable toggles. Stage order is fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagesConfig {
    pub keywords: bool,
    pub functions: bool,
    pub trailing: bool,
    pub operators: bool,
    pub indent: bool,
    pub blank_lines: bool,
    pub hash_lines: bool,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            keywords: true,
            functions: true,
            trailing: true,
            operators: true,
            indent: true,
            blank_lines: true,
            hash_lines: true,
        }
    }
}

impl StagesConfig {
    pub fn is_enabled(&self, kind: StageKind) -> bool {
        match kind {
            StageKind::Keywords => self.keywords,
            StageKind::Functions => self.functions,
            StageKind::Trailing => self.trailing,
            StageKind::Operators => self.operators,
            StageKind::Indent => self.indent,
            StageKind::BlankLines => self.blank_lines,
            StageKind::HashLines => self.hash_lines,
        }
    }

    /// Enabled stages, in pipeline order.
    pub fn enabled(&self) -> Vec<StageKind> {
        StageKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// [output]
// ---------------------------------------------------------------------------

/// Line terminator used when writing tidied scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lf => write!(f, "lf"),
            Self::Crlf => write!(f, "crlf"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory tidied scripts are written to.
    pub outdir: String,
    /// Inserted before the file extension of each written file.
    pub suffix: String,
    pub line_ending: LineEnding,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            outdir: defaults::OUTDIR.to_string(),
            suffix: String::new(),
            line_ending: LineEnding::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Run log location. A leading `~/` expands to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.titidy/run-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Style context
// ---------------------------------------------------------------------------

impl TidyConfig {
    /// Build the immutable style context handed to the pipeline.
    pub fn style_context(&self) -> StyleContext {
        let mut function_names = self.tables.function_names.clone();
        function_names.extend(self.tables.extra_function_names.iter().cloned());

        StyleContext {
            keywords: self.tables.keywords.clone(),
            function_names,
            operators: self.tables.operators.clone(),
            indent_unit: self.style.indent.clone(),
            max_consecutive_blank_lines: self.style.max_consecutive_blank_lines,
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl TidyConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `titidy config init`. The tables are left commented out so the
    /// built-in lists stay in effect until the user chooses to replace them.
    pub fn default_toml() -> String {
        r#"# titidy Configuration
# House style for TurboIntegrator scripts
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (TITIDY_*)
#   2. Project config (.titidy.toml in current directory)
#   3. User global config (~/.titidy/config.toml)
#   4. Built-in defaults

[style]
indent = "    "                       # Repeated once per nesting level
max_consecutive_blank_lines = 1

[tables]
# keywords = ["IF", "ELSEIF", "ELSE", "ENDIF", "WHILE", "END", "BREAK"]
# function_names = [...]              # Replaces the built-in list
# operators = ["=", "<>", "<=", ">=", "<", ">", "@=", "@<>", "@<=", "@>=", "@<", "@>"]
extra_function_names = []             # Appended to the function list

[stages]
keywords = true
functions = true
trailing = true
operators = true
indent = true
blank_lines = true
hash_lines = true

[output]
outdir = "tidy"
suffix = ""                           # e.g. "_tidy" writes foo_tidy.ti
line_ending = "lf"                    # lf | crlf

[logging]
enabled = true
path = "~/.titidy/run-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = TidyConfig::default();
        assert_eq!(config.style.indent, "    ");
        assert_eq!(config.style.max_consecutive_blank_lines, 1);
        assert!(config.tables.keywords.contains(&"ELSEIF".to_string()));
        assert!(config.tables.extra_function_names.is_empty());
        assert!(config.stages.operators);
        assert_eq!(config.output.outdir, "tidy");
        assert_eq!(config.output.line_ending, LineEnding::Lf);
        assert!(config.logging.enabled);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[style]
indent = "  "
"#;
        let config: TidyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.style.indent, "  ");
        // Everything else falls back to defaults
        assert_eq!(config.style.max_consecutive_blank_lines, 1);
        assert_eq!(config.tables.operators, defaults::operators());
    }

    #[test]
    fn deserialize_full_toml() {
        let toml_str = r#"
[style]
indent = "\t"
max_consecutive_blank_lines = 2

[tables]
keywords = ["IF", "ENDIF"]
function_names = ["CellGetN"]
extra_function_names = ["MyCustomCall"]
operators = ["=", "<>"]

[stages]
operators = false
hash_lines = false

[output]
outdir = "/tmp/out"
suffix = "_tidy"
line_ending = "crlf"

[logging]
enabled = false
path = "/tmp/titidy.jsonl"
"#;
        let config: TidyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.style.indent, "\t");
        assert_eq!(config.style.max_consecutive_blank_lines, 2);
        assert_eq!(config.tables.keywords, vec!["IF", "ENDIF"]);
        assert!(!config.stages.operators);
        assert!(!config.stages.hash_lines);
        assert!(config.stages.indent);
        assert_eq!(config.output.suffix, "_tidy");
        assert_eq!(config.output.line_ending, LineEnding::Crlf);
        assert!(!config.logging.enabled);

        let ctx = config.style_context();
        assert_eq!(ctx.function_names, vec!["CellGetN", "MyCustomCall"]);
        assert_eq!(ctx.indent_unit, "\t");
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: TidyConfig = toml::from_str("").unwrap();
        assert_eq!(config.style_context(), StyleContext::default());
    }

    #[test]
    fn enabled_stages_keep_pipeline_order() {
        let stages = StagesConfig {
            trailing: false,
            blank_lines: false,
            ..StagesConfig::default()
        };
        assert_eq!(
            stages.enabled(),
            vec![
                StageKind::Keywords,
                StageKind::Functions,
                StageKind::Operators,
                StageKind::Indent,
                StageKind::HashLines,
            ]
        );
    }

    #[test]
    fn default_toml_parses_back() {
        let toml_str = TidyConfig::default_toml();
        let config: TidyConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.style.indent, "    ");
        assert_eq!(config.tables.keywords, defaults::keywords());
        assert!(config.logging.enabled);
    }

    #[test]
    fn line_ending_display() {
        assert_eq!(LineEnding::Lf.to_string(), "lf");
        assert_eq!(LineEnding::Crlf.to_string(), "crlf");
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
    }
}
