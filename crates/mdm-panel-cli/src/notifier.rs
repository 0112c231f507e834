//! Terminal notification sink.

use mdm_panel_core::notify::{NoticeKind, NotificationSink};

use crate::output::{get_formatter, OutputFormatter};

/// Prints panel notices: successes to stdout, failures to stderr.
pub struct TerminalSink {
    formatter: Box<dyn OutputFormatter>,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        Self {
            formatter: get_formatter(json),
        }
    }
}

impl NotificationSink for TerminalSink {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let line = self.formatter.format_notice(kind, message);
        match kind {
            NoticeKind::Success => println!("{}", line),
            NoticeKind::Error => eprintln!("{}", line),
        }
    }
}
