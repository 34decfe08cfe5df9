//! Script I/O: turning files into line sequences and back.
//!
//! The pipeline only sees `Vec<String>`. This module owns everything at the
//! boundary: decoding, line-ending normalization, choosing where output goes,
//! and writing it to disk or the console.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::schema::LineEnding;

/// Input path meaning "read from stdin".
pub const STDIN_PATH: &str = "-";

const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Text <-> lines
// ---------------------------------------------------------------------------

/// Split script text into lines.
///
/// Accepts `\n`, `\r\n` and bare `\r` terminators. A terminator after the
/// last line does not produce an extra empty line. A leading byte-order mark
/// is dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);
    body.split('\n').map(str::to_string).collect()
}

/// Join lines into text, terminating every line (including the last).
pub fn join_lines(lines: &[String], ending: LineEnding) -> String {
    let ending = ending.as_str();
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + ending.len()).sum());
    for line in lines {
        out.push_str(line);
        out.push_str(ending);
    }
    out
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a script from a file, or from stdin when `path` is `-`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; TI
/// exports are often in a legacy code page.
pub fn read_script(path: &Path) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    if path == Path::new(STDIN_PATH) {
        io::stdin()
            .read_to_end(&mut bytes)
            .context("failed reading script from stdin")?;
    } else {
        bytes = fs::read(path).with_context(|| format!("failed reading {}", path.display()))?;
    }
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}

// ---------------------------------------------------------------------------
// Output location
// ---------------------------------------------------------------------------

/// Where a tidied script is written.
///
/// `outfile` wins when given; otherwise the input's file name (with `suffix`
/// inserted before its extension) is placed in `outdir`. Stdin input is named
/// `out.ti`.
pub fn output_path(input: &Path, outdir: &Path, outfile: Option<&str>, suffix: &str) -> PathBuf {
    if let Some(name) = outfile {
        return outdir.join(name);
    }

    if input == Path::new(STDIN_PATH) {
        return outdir.join(format!("out{suffix}.ti"));
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    outdir.join(name)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write lines to `path`, creating parent directories as needed.
pub fn write_script(path: &Path, lines: &[String], ending: LineEnding) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, join_lines(lines, ending))
        .with_context(|| format!("failed writing {}", path.display()))
}

/// Stream lines to stdout.
pub fn print_script(lines: &[String], ending: LineEnding) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(join_lines(lines, ending).as_bytes())
        .context("failed writing output to stdout")?;
    stdout.flush().context("failed flushing stdout")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_all_line_endings() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\rb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n\nb"), vec!["a", "", "", "b"]);
    }

    #[test]
    fn split_empty_and_newline_only() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("\n\n"), vec!["", ""]);
    }

    #[test]
    fn split_drops_bom() {
        assert_eq!(split_lines("\u{feff}IF(a);\n"), vec!["IF(a);"]);
    }

    #[test]
    fn join_terminates_every_line() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(join_lines(&lines, LineEnding::Lf), "a\n\nb\n");
        assert_eq!(join_lines(&lines, LineEnding::Crlf), "a\r\n\r\nb\r\n");
        assert_eq!(join_lines(&[], LineEnding::Lf), "");
    }

    #[test]
    fn output_path_uses_input_name() {
        let path = output_path(Path::new("src/prolog.ti"), Path::new("tidy"), None, "");
        assert_eq!(path, PathBuf::from("tidy/prolog.ti"));
    }

    #[test]
    fn output_path_applies_suffix_before_extension() {
        let path = output_path(Path::new("a/b/epilog.ti"), Path::new("out"), None, "_tidy");
        assert_eq!(path, PathBuf::from("out/epilog_tidy.ti"));

        let path = output_path(Path::new("data"), Path::new("out"), None, "_tidy");
        assert_eq!(path, PathBuf::from("out/data_tidy"));
    }

    #[test]
    fn output_path_prefers_outfile() {
        let path = output_path(Path::new("x.ti"), Path::new("out"), Some("y.ti"), "_t");
        assert_eq!(path, PathBuf::from("out/y.ti"));
    }

    #[test]
    fn output_path_for_stdin() {
        let path = output_path(Path::new("-"), Path::new("out"), None, "");
        assert_eq!(path, PathBuf::from("out/out.ti"));
    }

    #[test]
    fn write_then_read_back() {
        let dir = std::env::temp_dir().join(format!("titidy-script-{}", std::process::id()));
        let path = dir.join("nested").join("x.ti");
        let lines = vec!["IF(a);".to_string(), "    b;".to_string(), "ENDIF;".to_string()];

        write_script(&path, &lines, LineEnding::Crlf).unwrap();
        assert_eq!(read_script(&path).unwrap(), lines);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn read_missing_file_errors() {
        assert!(read_script(Path::new("/nonexistent/titidy/in.ti")).is_err());
    }
}
