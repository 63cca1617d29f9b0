//! DiagnosticCollector - collects non-fatal findings made while filtering
use std::fmt;

/// One warning, optionally tied to a JSON pointer into the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub path: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "warning: {} (at {})", self.message, path),
            None => write!(f, "warning: {}", self.message),
        }
    }
}

/// Collector for diagnostic messages
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(path = ?diagnostic.path, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Diagnostic {
            message: message.into(),
            path: None,
        });
    }

    pub fn warn_at(&mut self, message: impl Into<String>, path: impl Into<String>) {
        self.push(Diagnostic {
            message: message.into(),
            path: Some(path.into()),
        });
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collector() {
        assert!(DiagnosticCollector::new().into_diagnostics().is_empty());
    }

    #[test]
    fn test_warnings_keep_order_and_location() {
        let mut collector = DiagnosticCollector::new();
        collector.warn("plain");
        collector.warn_at("located", "/meta/heading-depth");
        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics[1].path.as_deref(), Some("/meta/heading-depth"));
        assert_eq!(
            diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "warning: plain".to_string(),
                "warning: located (at /meta/heading-depth)".to_string()
            ]
        );
    }
}
