//! Integration points the editor calls back into

use crate::ConsoleResult;

/// Host environment of a redemption editor (console, terminal, tests)
///
/// `refresh` and `close` are invoked at most once per submission.
pub trait EditorHost {
    /// Transient success notification
    fn notify_success(&mut self, message: &str);

    /// Transient error notification
    fn notify_error(&mut self, message: &str);

    /// Blocking yes/no decision
    fn confirm(&mut self, title: &str, content: &[String]) -> bool;

    /// Hands a text file to the operator
    fn download_text(&mut self, file_name: &str, contents: &str) -> ConsoleResult<()>;

    /// Reloads whatever listing the editor was opened from
    fn refresh(&mut self);

    /// Hides the editor
    fn close(&mut self);
}
