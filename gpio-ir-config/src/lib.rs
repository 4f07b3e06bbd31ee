use std::fmt::Write;
use std::{ops::Range, path::Path};

pub mod parser;
pub mod replay;

#[derive(Debug, PartialEq)]
pub struct ConfigFileError {
    pub message: String,
    pub span: Option<Range<usize>>,
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{}\n    at: ({:?})", &self.message, span),
            None => write!(f, "{}", &self.message),
        }
    }
}

impl std::error::Error for ConfigFileError {}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self {
            message: err.to_string(),
            span: None,
        }
    }
}

impl From<&str> for ConfigFileError {
    fn from(err: &str) -> Self {
        Self {
            message: err.to_string(),
            span: None,
        }
    }
}

impl ConfigFileError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }

    fn char_span(&self, source: &str) -> Option<Range<usize>> {
        let span = self.span.clone()?;
        let start = source.get(..span.start)?.chars().count();
        let len = source.get(span.start..span.end)?.chars().count();
        Some(start..start + len)
    }

    /// The error with the line it occurred on, for terminals that cannot show a report.
    pub fn long_format(&self, source_file: &Path, source: &str) -> String {
        let (line, col, slice) = self.line_col_slice(source);
        let width = format!("{}", line + 10).len();
        format!(
            "error: {} \n   --> {}:{}:{}\n{}",
            self.message,
            source_file.display(),
            line,
            col,
            source[slice.0..slice.1]
                .split('\n')
                .enumerate()
                .fold(String::new(), |mut output, l| {
                    let _ = writeln!(output, " {:>width$} | {}", line + l.0, l.1);
                    output
                })
        )
    }

    /// One based line and column of the span start, and the byte range of that line.
    pub fn line_col_slice(&self, source: &str) -> (usize, usize, (usize, usize)) {
        let mut line = 1;
        let mut col = 1;
        let mut sol = 0;
        let Some(span) = self.span.clone() else {
            return (0, 0, (0, 0));
        };

        for (i, c) in source.char_indices() {
            match c {
                '\n' => {
                    if i < span.start {
                        line += 1;
                        col = 1;
                        sol = i + 1;
                    } else {
                        return (line, col, (sol, i));
                    }
                }
                _ if i < span.start => {
                    col += 1;
                }
                _ => {}
            }
        }
        (line, col, (sol, source.len()))
    }
}

/// Parse a config file, printing a source report to stderr when it is invalid.
pub fn pretty_parse(
    file: &Path,
    src: &str,
) -> Result<gpio_ir::config::GpioIrConfig, ConfigFileError> {
    match parser::parse(src) {
        Ok(config) => Ok(config),
        Err(err) => {
            use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
            let filename = file.to_str().unwrap_or("<unknown>");
            let mut colors = ColorGenerator::new();

            let a = colors.next();
            if let Some(span) = err.char_span(src) {
                let printed = Report::build(ReportKind::Error, (filename, span.clone()))
                    .with_message("Invalid config".to_string())
                    .with_label(
                        Label::new((filename, span))
                            .with_message(&err.message)
                            .with_color(a),
                    )
                    .finish()
                    .eprint((filename, Source::from(src)));
                if printed.is_err() {
                    eprintln!("{}", err.long_format(file, src));
                }
            }
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
