//! Syntax dispatch and converters.

use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, error};

use crate::error::MarkupError;
use crate::renderer::StorageRenderer;
use crate::syntax::Syntax;

/// Default docutils front end.
const DEFAULT_RST_COMMAND: &str = "rst2html";

const DOCUTILS_HINT: &str = "Install docutils for the Python interpreter on your PATH \
(`pip install docutils`) so that rst2html is available, or set markup.rst_command \
in pagesync.toml.";

/// Converts document text to storage format.
pub trait Converter {
    /// Convert text to storage HTML.
    fn convert(&self, text: &str) -> Result<String, MarkupError>;
}

/// Markdown converter backed by pulldown-cmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn convert(&self, text: &str) -> Result<String, MarkupError> {
        Ok(StorageRenderer::new().render_markdown(text))
    }
}

/// reStructuredText converter running an external docutils front end.
///
/// The program reads the document on stdin and writes an HTML page on
/// stdout; only the `<body>` content is kept.
#[derive(Debug, Clone)]
pub struct RstConverter {
    program: String,
    args: Vec<String>,
}

impl RstConverter {
    /// Create a converter from a command line such as `rst2html --no-doc-title`.
    #[must_use]
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_owned);
        let program = parts
            .next()
            .unwrap_or_else(|| DEFAULT_RST_COMMAND.to_owned());
        Self {
            program,
            args: parts.collect(),
        }
    }

    fn missing_dependency(&self) -> MarkupError {
        MarkupError::MissingDependency {
            program: self.program.clone(),
            hint: DOCUTILS_HINT,
        }
    }
}

impl Default for RstConverter {
    fn default() -> Self {
        Self::new(DEFAULT_RST_COMMAND)
    }
}

impl Converter for RstConverter {
    fn convert(&self, text: &str) -> Result<String, MarkupError> {
        debug!("Running {} for reStructuredText", self.program);

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("{} not found: {}", self.program, e);
                return Err(self.missing_dependency());
            }
            Err(e) => return Err(e.into()),
        };

        // stdin is fed from its own thread while stdout and stderr drain.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer =
                stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(text.as_bytes())));
            let output = child.wait_with_output();
            let written = writer.map_or(Ok(()), |handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")))
            });
            (written, output)
        });
        let output = output?;

        if !output.status.success() {
            return Err(MarkupError::ConverterFailed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        match written {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("{} stopped reading its input: {}", self.program, e);
            }
            Err(e) => return Err(e.into()),
            Ok(()) => {}
        }

        let page = String::from_utf8_lossy(&output.stdout);
        Ok(extract_body(&page).to_owned())
    }
}

/// Return the content between `<body>` and `</body>`, or the input if absent.
fn extract_body(page: &str) -> &str {
    let Some(open) = page.find("<body") else {
        return page.trim();
    };
    let Some(start) = page[open..].find('>').map(|i| open + i + 1) else {
        return page.trim();
    };
    let end = page.rfind("</body>").filter(|&end| end >= start).unwrap_or(page.len());
    page[start..end].trim()
}

/// Dispatches documents to the converter for their syntax.
#[derive(Debug, Clone, Default)]
pub struct Markup {
    markdown: MarkdownConverter,
    rst: RstConverter,
}

impl Markup {
    /// Create a dispatcher with the given reStructuredText command line.
    #[must_use]
    pub fn new(rst_command: &str) -> Self {
        Self {
            markdown: MarkdownConverter,
            rst: RstConverter::new(rst_command),
        }
    }

    /// Converter registered for a syntax.
    pub fn converter(&self, syntax: Syntax) -> &dyn Converter {
        match syntax {
            Syntax::Markdown => &self.markdown,
            Syntax::ReStructuredText => &self.rst,
        }
    }

    /// Convert content written in the syntax named by `identifier`.
    ///
    /// # Errors
    ///
    /// - [`MarkupError::UnsupportedSyntax`] when no converter is registered
    /// - [`MarkupError::ConversionEmpty`] when the converter produced nothing
    /// - [`MarkupError::MissingDependency`] when the external RST converter is
    ///   not installed
    /// - [`MarkupError::ConverterFailed`] when it exits with a failure status
    pub fn to_html(&self, content: &str, identifier: &str) -> Result<String, MarkupError> {
        let syntax = Syntax::from_identifier(identifier)?;
        let html = self.converter(syntax).convert(content)?;
        if html.trim().is_empty() {
            return Err(MarkupError::ConversionEmpty);
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_flavours_produce_identical_output() {
        let markup = Markup::default();
        let content = "# Title\n\nSome *text* with a [link](https://example.com).";
        let plain = markup.to_html(content, "Markdown").unwrap();
        let extended = markup.to_html(content, "Markdown Extended").unwrap();
        let standard = markup.to_html(content, "Markdown (Standard)").unwrap();
        assert_eq!(plain, extended);
        assert_eq!(plain, standard);
    }

    #[test]
    fn test_heading_conversion() {
        let html = Markup::default().to_html("# Hello", "Markdown").unwrap();
        assert_eq!(html, "<h1>Hello</h1>");
    }

    #[test]
    fn test_unknown_syntax_returns_no_content() {
        let err = Markup::default()
            .to_html("anything", "UnknownSyntax")
            .unwrap_err();
        assert!(matches!(err, MarkupError::UnsupportedSyntax(ref s) if s == "UnknownSyntax"));
    }

    #[test]
    fn test_empty_conversion() {
        let err = Markup::default().to_html("   \n", "Markdown").unwrap_err();
        assert!(matches!(err, MarkupError::ConversionEmpty));
        assert_eq!(err.to_string(), "Can not parse this document.");
    }

    #[test]
    fn test_missing_rst_converter() {
        let markup = Markup::new("pagesync-no-such-rst2html");
        let err = markup
            .to_html("Title\n=====", "reStructuredText")
            .unwrap_err();
        match err {
            MarkupError::MissingDependency { program, hint } => {
                assert_eq!(program, "pagesync-no-such-rst2html");
                assert!(hint.contains("docutils"));
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_rst_converter_keeps_body_of_output() {
        let converter = RstConverter::new("cat");
        let html = converter
            .convert("<html><head></head><body>\n<p>hi</p>\n</body></html>")
            .unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_rst_converter_streams_large_documents() {
        let paragraph = format!("<p>{}</p>", "x".repeat(1 << 20));
        let html = RstConverter::new("cat")
            .convert(&format!("<body>{paragraph}</body>"))
            .unwrap();
        assert_eq!(html.len(), paragraph.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_rst_converter_failure_reports_status() {
        let err = RstConverter::new("false")
            .convert(&"x".repeat(1 << 20))
            .unwrap_err();
        match err {
            MarkupError::ConverterFailed { program, stderr } => {
                assert_eq!(program, "false");
                assert_eq!(stderr, "");
            }
            other => panic!("expected ConverterFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_rst_converter_failure_keeps_stderr() {
        let converter = RstConverter {
            program: "sh".to_owned(),
            args: vec!["-c".to_owned(), "echo 'unknown option' >&2; exit 2".to_owned()],
        };
        let err = converter.convert("Title\n=====").unwrap_err();
        assert_eq!(err.to_string(), "sh failed: unknown option");
    }

    #[test]
    fn test_rst_command_line_split() {
        let converter = RstConverter::new("rst2html5 --no-doc-title");
        assert_eq!(converter.program, "rst2html5");
        assert_eq!(converter.args, vec!["--no-doc-title".to_owned()]);
    }

    #[test]
    fn test_extract_body() {
        let page = "<html><head><title>x</title></head>\n<body>\n\
                    <div class=\"document\"><p>Hi</p></div>\n</body>\n</html>";
        assert_eq!(extract_body(page), r#"<div class="document"><p>Hi</p></div>"#);
        assert_eq!(extract_body("<p>fragment</p>\n"), "<p>fragment</p>");
    }
}
