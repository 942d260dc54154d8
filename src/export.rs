//! Export of generated redemption codes as plain text

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ConsoleResult;

/// One code per line, every line newline-terminated
pub fn codes_to_text(codes: &[String]) -> String {
    let mut text = String::with_capacity(codes.iter().map(|c| c.len() + 1).sum());
    for code in codes {
        text.push_str(code);
        text.push('\n');
    }
    text
}

/// `{name}.txt`, with path separators replaced so the file stays in its directory
pub fn export_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("{}.txt", safe)
}

/// Writes the text export into `directory` and returns the file path
pub fn write_text_file(
    directory: &Path,
    file_name: &str,
    contents: &str,
) -> ConsoleResult<PathBuf> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name);
    fs::write(&path, contents)?;

    info!("Exported redemption codes: path={}", path.display());

    Ok(path)
}
