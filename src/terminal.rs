//! Terminal host for the command-line front end

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use redemption_console::export::write_text_file;
use redemption_console::{ConsoleError, ConsoleResult, EditorHost};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

pub struct TerminalHost {
    export_dir: PathBuf,
    auto_confirm: bool,
    errors: usize,
}

impl TerminalHost {
    pub fn new(export_dir: PathBuf, auto_confirm: bool) -> Self {
        Self {
            export_dir,
            auto_confirm,
            errors: 0,
        }
    }

    /// Number of error notifications shown so far
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl EditorHost for TerminalHost {
    fn notify_success(&mut self, message: &str) {
        println!("{}", message);
    }

    fn notify_error(&mut self, message: &str) {
        self.errors += 1;
        eprintln!("error: {}", message);
    }

    fn confirm(&mut self, title: &str, content: &[String]) -> bool {
        if self.auto_confirm {
            return true;
        }

        println!("{}", title);
        for line in content {
            println!("  {}", line);
        }
        print!("[y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn download_text(&mut self, file_name: &str, contents: &str) -> ConsoleResult<()> {
        let path = write_text_file(&self.export_dir, file_name, contents)?;
        println!("Saved {}", path.display());
        Ok(())
    }

    fn refresh(&mut self) {
        debug!("Refresh requested");
    }

    fn close(&mut self) {
        debug!("Editor closed");
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` (UTC) or `YYYY-MM-DD` (midnight UTC)
pub fn parse_expiry(value: &str) -> ConsoleResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(at.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(at) = date.and_hms_opt(0, 0, 0) {
            return Ok(at.and_utc());
        }
    }

    Err(ConsoleError::InvalidInput(format!(
        "unrecognized expiry time: {}",
        value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_formats() {
        assert_eq!(parse_expiry("2030-01-01T00:00:00Z").unwrap().timestamp(), 1_893_456_000);
        assert_eq!(parse_expiry("2030-01-01T08:00:00+08:00").unwrap().timestamp(), 1_893_456_000);
        assert_eq!(parse_expiry("2030-01-01 00:00:00").unwrap().timestamp(), 1_893_456_000);
        assert_eq!(parse_expiry("2030-01-01 00:00").unwrap().timestamp(), 1_893_456_000);
        assert_eq!(parse_expiry("2030-01-01").unwrap().timestamp(), 1_893_456_000);
    }

    #[test]
    fn test_parse_expiry_rejects_garbage() {
        assert!(matches!(parse_expiry("next tuesday"), Err(ConsoleError::InvalidInput(_))));
    }

    #[test]
    fn test_auto_confirm() {
        let mut host = TerminalHost::new(PathBuf::from("."), true);
        assert!(host.confirm("title", &[]));
    }

    #[test]
    fn test_error_count() {
        let mut host = TerminalHost::new(PathBuf::from("."), true);
        host.notify_error("boom");
        assert_eq!(host.error_count(), 1);
    }
}
