//! Status messages for `quill` commands.
//!
//! Everything goes to stderr so the HTML that `quill render` writes to stdout
//! can be piped without noise.

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
        }
    }

    /// Plain progress line, e.g. the resolved build directories.
    pub(crate) fn info(&self, msg: &str) {
        self.line(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warning, &format!("warning: {msg}"));
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.error, msg);
    }

    // A closed stderr leaves nothing to report to.
    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
