use std::path::Path;

/// One non-comment source line together with its physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: &str) -> Self {
        Self {
            number,
            text: text.to_string(),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.text.split_whitespace().map(|s| s.to_string()).collect()
    }

    pub fn last_token(&self) -> Option<&str> {
        self.text.split_whitespace().last()
    }

    /// Number plain lines consecutively from 1.
    pub fn numbered<S: AsRef<str>>(lines: &[S]) -> Vec<SourceLine> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| SourceLine::new(i + 1, l.as_ref()))
            .collect()
    }
}

/// Split program text into lines, dropping `#` comments and blank lines.
pub fn split_to_lines(source: &str) -> Vec<SourceLine> {
    source
        .split('\n')
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.starts_with('#') || line.trim().is_empty() {
                None
            } else {
                Some(SourceLine::new(i + 1, line))
            }
        })
        .collect()
}

pub fn read_source<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
