/// Configuration system for titidy.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::TidyConfig::default()`] and the
///    tables in [`defaults`]
/// 2. **User global config**: `~/.titidy/config.toml`
/// 3. **Project local config**: `.titidy.toml` in the current working directory
/// 4. **Environment variables**: `TITIDY_*` overrides (highest precedence)
///
/// Later layers override earlier ones key by key: a project file that only
/// sets `style.indent` keeps every other value from the global file.
///
/// # Usage
///
/// ```rust,ignore
/// use titidy::config;
/// use titidy::pipeline::Pipeline;
///
/// let cfg = config::load();
/// let pipeline = Pipeline::with_stages(cfg.style_context(), &cfg.stages.enabled());
/// ```
pub mod defaults;
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::TidyConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> TidyConfig {
    let layers: Vec<PathBuf> = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();

    let mut config = load_layers(&layers);
    apply_env_overrides(&mut config);
    config
}

/// Merge the given TOML files over the built-in defaults, in order.
///
/// Missing files are skipped. A file that does not parse, or whose values
/// have the wrong types, is ignored as a whole and the previous layers stay
/// in effect.
pub fn load_layers(paths: &[PathBuf]) -> TidyConfig {
    let mut merged = match toml::Value::try_from(TidyConfig::default()) {
        Ok(value) => value,
        Err(_) => return TidyConfig::default(),
    };

    for path in paths {
        let Some(layer) = load_toml_layer(path) else {
            continue;
        };
        let mut candidate = merged.clone();
        merge_values(&mut candidate, layer);
        if candidate.clone().try_into::<TidyConfig>().is_ok() {
            merged = candidate;
        }
    }

    merged.try_into().unwrap_or_default()
}

/// Read a TOML file as a raw value tree.
fn load_toml_layer(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively merge `overlay` into `base`. Tables merge key by key; any
/// other value (arrays included) replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.titidy/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".titidy").join("config.toml"))
}

/// Path to the project local config: `.titidy.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".titidy.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `TITIDY_INDENT`: indent unit; the two characters `\t` mean a tab
/// - `TITIDY_MAX_BLANK_LINES`: maximum consecutive blank lines
/// - `TITIDY_OUTDIR`: output directory
/// - `TITIDY_LOGGING`: run log enabled (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut TidyConfig) {
    if let Ok(val) = std::env::var("TITIDY_INDENT")
        && !val.is_empty()
    {
        config.style.indent = unescape_indent(&val);
    }
    if let Ok(val) = std::env::var("TITIDY_MAX_BLANK_LINES")
        && let Ok(n) = val.trim().parse::<usize>()
    {
        config.style.max_consecutive_blank_lines = n;
    }
    if let Ok(val) = std::env::var("TITIDY_OUTDIR")
        && !val.is_empty()
    {
        config.output.outdir = val;
    }
    if let Ok(val) = std::env::var("TITIDY_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Keys holding an indent unit, where `\t` is accepted for a tab.
const INDENT_KEYS: &[&str] = &["style.indent"];

/// Shells make a literal tab awkward to pass, so accept the escape.
fn unescape_indent(val: &str) -> String {
    val.replace("\\t", "\t")
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.titidy/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.titidy/ directory")?;
    }

    fs::write(&path, TidyConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `style.indent`. The key must exist in the
/// schema; the new value is parsed to the type of the current value.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    let defaults =
        toml::Value::try_from(TidyConfig::default()).context("failed to serialize defaults")?;

    set_toml_value(&mut root, &defaults, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// Missing intermediate tables are created. The value's type is taken from
/// the existing entry in `root`, or from `defaults` when `root` lacks it.
fn set_toml_value(
    root: &mut toml::Value,
    defaults: &toml::Value,
    key: &str,
    raw_value: &str,
) -> Result<()> {
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    let Some((&leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut default_node = defaults;
    for &part in &parts {
        default_node = default_node
            .get(part)
            .with_context(|| format!("unknown config key '{key}'"))?;
    }

    let mut current = root;
    for &part in sections {
        let table = current
            .as_table_mut()
            .with_context(|| format!("expected table above '{part}' in '{key}'"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let template = table.get(leaf).unwrap_or(default_node);
    let new_value = match template {
        toml::Value::Boolean(_) => toml::Value::Boolean(is_truthy(raw_value)),
        toml::Value::Integer(_) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        toml::Value::Float(_) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        toml::Value::Array(_) => {
            // Parse as comma-separated list
            let items: Vec<toml::Value> = raw_value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect();
            toml::Value::Array(items)
        }
        toml::Value::Table(_) => {
            anyhow::bail!("'{key}' is a section, not a value");
        }
        _ if INDENT_KEYS.contains(&parts.join(".").as_str()) => {
            toml::Value::String(unescape_indent(raw_value))
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
