use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::markdown_to_html_page;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid search pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of converting a batch of files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub total: usize,
}

/// Find `*.md` files directly in `root`, or anywhere below it when `recursive`.
pub fn find_markdown_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ConvertError> {
    let file_pattern = if recursive { "**/*.md" } else { "*.md" };
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        file_pattern
    );

    let entries = glob::glob(&pattern).map_err(|source| ConvertError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => log::warn!("Skipping {}: {}", e.path().display(), e.error()),
        }
    }

    log::debug!("Found {} file(s) matching {pattern}", files.len());
    Ok(files)
}

/// Convert one Markdown file to a sibling page and return the path written.
pub fn convert_file(path: &Path, config: &Config) -> Result<PathBuf, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let markdown = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let markdown = normalize_newlines(&markdown);

    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let page = markdown_to_html_page(&title, &markdown, config);

    let output = path.with_extension(&config.output.extension);
    fs::write(&output, page).map_err(|source| ConvertError::Write {
        path: output.clone(),
        source,
    })?;

    log::debug!("Wrote {}", output.display());
    Ok(output)
}

/// Convert every file, reporting each result. Failures do not stop the batch.
pub fn convert_all(files: &[PathBuf], config: &Config) -> Summary {
    let mut succeeded = 0;

    for path in files {
        match convert_file(path, config) {
            Ok(output) => {
                println!(
                    "✓ Converted: {} -> {}",
                    display_name(path),
                    display_name(&output)
                );
                succeeded += 1;
            }
            Err(e) => {
                log::debug!("Conversion of {} failed: {e:?}", path.display());
                println!("{}", failure_message(path, &e));
            }
        }
    }

    Summary {
        succeeded,
        total: files.len(),
    }
}

// A missing file gets a plain error line; anything else names the file being processed.
fn failure_message(path: &Path, error: &ConvertError) -> String {
    match error {
        ConvertError::NotFound { .. } => format!("Error: {error}"),
        _ => format!("✗ Error processing '{}': {}", path.display(), error),
    }
}

/// `\r\n` and lone `\r` line endings become `\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn finds_top_level_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "a.md", "# A");
        write(root, "b.txt", "not markdown");
        write(root, "sub/c.md", "# C");

        let files = find_markdown_files(root, false).unwrap();

        assert_eq!(files, vec![root.join("a.md")]);
    }

    #[test]
    fn finds_nested_files_when_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "a.md", "# A");
        write(root, "sub/c.md", "# C");
        write(root, "sub/deeper/d.md", "# D");

        let mut files = find_markdown_files(root, true).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                root.join("a.md"),
                root.join("sub/c.md"),
                root.join("sub/deeper/d.md"),
            ]
        );
    }

    #[test]
    fn empty_directory_has_no_files() {
        let temp_dir = TempDir::new().unwrap();

        let files = find_markdown_files(temp_dir.path(), true).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn writes_sibling_html() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "notes.md", "# Hello\n\n- *one*");

        let output = convert_file(&input, &Config::compiled_default()).unwrap();

        assert_eq!(output, temp_dir.path().join("notes.html"));
        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains("<title>notes</title>"));
        assert!(page.contains(
            "<body>\n<h1>Hello</h1>\n<br>\n<ul>\n  <li><em>one</em></li>\n</ul>\n\n"
        ));
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "windows.md", "hello\r\n- a\r\n");

        let output = convert_file(&input, &Config::compiled_default()).unwrap();

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains("<body>\n<p>hello</p>\n<ul>\n  <li>a</li>\n</ul>\n<br>\n\n"));
    }

    #[test]
    fn lone_carriage_returns_split_lines() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "classic.md", "# Title\r```\r<x>\r```");

        let output = convert_file(&input, &Config::compiled_default()).unwrap();

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains(
            "<body>\n<h1>Title</h1>\n<pre><code class=\"\">\n&lt;x&gt;\n</code></pre>\n\n"
        ));
    }

    #[test]
    fn normalize_newlines_handles_mixed_endings() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn uses_configured_extension() {
        let temp_dir = TempDir::new().unwrap();
        let input = write(temp_dir.path(), "page.md", "text");
        let mut config = Config::compiled_default();
        config.output.extension = "htm".to_string();

        let output = convert_file(&input, &config).unwrap();

        assert_eq!(output, temp_dir.path().join("page.htm"));
        assert!(output.exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("gone.md");

        let err = convert_file(&input, &Config::compiled_default()).unwrap_err();

        assert!(matches!(err, ConvertError::NotFound { .. }));
        assert!(!temp_dir.path().join("gone.html").exists());
    }

    #[test]
    fn failure_messages() {
        let missing = PathBuf::from("x.md");
        let not_found = ConvertError::NotFound {
            path: missing.clone(),
        };
        let read = ConvertError::Read {
            path: missing.clone(),
            source: std::io::Error::other("boom"),
        };

        assert_eq!(
            failure_message(&missing, &not_found),
            "Error: File 'x.md' not found."
        );
        assert_eq!(
            failure_message(&missing, &read),
            "✗ Error processing 'x.md': Failed to read x.md: boom"
        );
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("binary.md");
        fs::write(&input, [0xff, 0xfe, 0x00]).unwrap();

        let err = convert_file(&input, &Config::compiled_default()).unwrap_err();

        assert!(matches!(err, ConvertError::Read { .. }));
    }

    #[test]
    fn batch_continues_past_failures() {
        let temp_dir = TempDir::new().unwrap();
        let good = write(temp_dir.path(), "good.md", "ok");
        let missing = temp_dir.path().join("missing.md");
        let also_good = write(temp_dir.path(), "also.md", "ok");

        let summary = convert_all(&[good, missing, also_good], &Config::compiled_default());

        assert_eq!(
            summary,
            Summary {
                succeeded: 2,
                total: 3
            }
        );
        assert!(temp_dir.path().join("good.html").exists());
        assert!(temp_dir.path().join("also.html").exists());
    }
}
