//! Line-oriented access to ASCII MSH content.

use std::io::BufRead;
use std::str::FromStr;

use crate::error::MshError;

/// Reads trimmed, non-empty lines and tracks the current line number for
/// error messages.
pub(crate) struct LineReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of the line returned last.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> MshError {
        MshError::parse(self.line, message)
    }

    /// Next non-empty line, trimmed, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, MshError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.buf.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// Next non-empty line; end of input is an error naming `what`.
    pub(crate) fn expect_line(&mut self, what: &str) -> Result<String, MshError> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(self.error(format!("unexpected end of file, expected {what}"))),
        }
    }

    /// Parses every whitespace-separated token of the next line.
    pub(crate) fn numbers<T: FromStr>(&mut self, what: &str) -> Result<Vec<T>, MshError> {
        let line = self.expect_line(what)?;
        self.parse_all(&line, what)
    }

    pub(crate) fn parse_all<T: FromStr>(&self, line: &str, what: &str) -> Result<Vec<T>, MshError> {
        line.split_whitespace()
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| self.error(format!("invalid {what} `{token}`")))
            })
            .collect()
    }

    /// Parses token `index` of an already split line.
    pub(crate) fn field<T: FromStr>(
        &self,
        tokens: &[&str],
        index: usize,
        what: &str,
    ) -> Result<T, MshError> {
        let token = tokens
            .get(index)
            .ok_or_else(|| self.error(format!("missing {what}")))?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid {what} `{token}`")))
    }

    /// Parses the next line and checks it has at least `min` tokens.
    pub(crate) fn header<T: FromStr>(&mut self, what: &str, min: usize) -> Result<Vec<T>, MshError> {
        let values = self.numbers(what)?;
        if values.len() < min {
            return Err(self.error(format!(
                "{what} needs {min} values, got {}",
                values.len()
            )));
        }
        Ok(values)
    }

    /// Parses the next line as a single count.
    pub(crate) fn count(&mut self, what: &str) -> Result<usize, MshError> {
        Ok(self.header::<usize>(what, 1)?[0])
    }

    /// Requires the next line to be `$End<section>`.
    pub(crate) fn expect_end(&mut self, section: &str) -> Result<(), MshError> {
        let line = self.expect_line(&format!("$End{section}"))?;
        if line.strip_prefix("$End") == Some(section) {
            Ok(())
        } else {
            Err(self.error(format!("expected $End{section}, found `{line}`")))
        }
    }

    /// Skips up to and including `$End<section>`.
    pub(crate) fn skip_section(&mut self, section: &str) -> Result<(), MshError> {
        while let Some(line) = self.next_line()? {
            if line.strip_prefix("$End") == Some(section) {
                return Ok(());
            }
        }
        Err(self.error(format!("unterminated ${section} section")))
    }
}
