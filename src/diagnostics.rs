use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Accumulates every message produced during one export pass.
///
/// Nothing is dropped: each record is kept for inspection by the caller and
/// forwarded to the `log` facade as it arrives. The error/warning counters
/// feed the end-of-pass summary.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    errors: u32,
    warnings: u32,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.records.push(Diagnostic {
            severity: Severity::Info,
            message,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.warnings += 1;
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.errors += 1;
        self.records.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn warning_count(&self) -> u32 {
        self.warnings
    }

    /// One-line pass summary, logged by the pass driver when a pass ends.
    pub fn summary(&self) -> String {
        format!(
            "export finished with {} error(s), {} warning(s)",
            self.errors, self.warnings
        )
    }
}
