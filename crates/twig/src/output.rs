//! Colored terminal output on stderr.

use console::{Style, Term};
use twig_storage::ImportFailure;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    /// Plain progress line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.ok, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.fail, msg);
    }

    /// One block per failed note: file name, then each reason.
    pub(crate) fn failures(&self, failures: &[ImportFailure]) {
        for failure in failures {
            self.warning(&format!("  {}", failure.file_name));
            for reason in &failure.errors {
                self.warning(&format!("    - {reason}"));
            }
        }
    }
}
