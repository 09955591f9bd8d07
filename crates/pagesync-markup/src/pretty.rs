//! Storage format pretty printing.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;
use tracing::debug;

/// Elements that flow with text and never start a new line.
const INLINE_ELEMENTS: &[&[u8]] = &[
    b"a",
    b"abbr",
    b"b",
    b"br",
    b"cite",
    b"code",
    b"del",
    b"em",
    b"i",
    b"img",
    b"ins",
    b"kbd",
    b"q",
    b"s",
    b"small",
    b"span",
    b"strike",
    b"strong",
    b"sub",
    b"sup",
    b"time",
    b"u",
    b"ac:emoticon",
    b"ac:image",
    b"ac:inline-comment-marker",
    b"ac:link",
    b"ac:link-body",
    b"ac:placeholder",
    b"ac:plain-text-link-body",
    b"ri:attachment",
    b"ri:page",
    b"ri:url",
    b"ri:user",
];

fn is_inline(name: &[u8]) -> bool {
    INLINE_ELEMENTS.contains(&name)
}

/// Line layout state while re-writing events.
struct Layout {
    writer: Writer<Vec<u8>>,
    /// Number of open elements.
    depth: usize,
    /// Depth of the element whose content is written as is.
    mixed: Option<usize>,
    /// The previous event opened a block element.
    after_start: bool,
}

impl Layout {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            depth: 0,
            mixed: None,
            after_start: false,
        }
    }

    fn break_line(&mut self, level: usize) {
        let out = self.writer.get_mut();
        if !out.is_empty() {
            out.push(b'\n');
            out.extend(std::iter::repeat_n(b' ', level * 2));
        }
    }

    /// Mark the innermost open element as carrying text.
    fn enter_mixed(&mut self) {
        if self.mixed.is_none() {
            self.mixed = Some(self.depth);
        }
    }

    fn write(&mut self, event: Event<'_>) -> std::io::Result<()> {
        let mut opened_block = false;
        match &event {
            Event::Start(e) if self.mixed.is_none() && !is_inline(e.name().as_ref()) => {
                self.break_line(self.depth);
                opened_block = true;
            }
            Event::Empty(e) if self.mixed.is_none() && !is_inline(e.name().as_ref()) => {
                self.break_line(self.depth);
            }
            Event::Start(_) | Event::Empty(_) | Event::GeneralRef(_) | Event::CData(_) => {
                self.enter_mixed();
            }
            Event::Text(e) if self.mixed.is_none() => {
                // Formatting whitespace between blocks is re-created.
                if e.contains(&b'\n') && e.iter().all(u8::is_ascii_whitespace) {
                    return Ok(());
                }
                self.enter_mixed();
            }
            Event::End(_) => {
                self.depth = self.depth.saturating_sub(1);
                match self.mixed {
                    Some(level) if level > self.depth => self.mixed = None,
                    Some(_) => {}
                    None if !self.after_start => self.break_line(self.depth),
                    None => {}
                }
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)
                if self.mixed.is_none() =>
            {
                self.break_line(self.depth);
            }
            _ => {}
        }
        if matches!(event, Event::Start(_)) {
            self.depth += 1;
        }
        self.after_start = opened_block;
        self.writer.write_event(event)
    }
}

/// Re-indent storage XHTML for editing.
///
/// Block structure is placed on separate lines with two-space indentation.
/// Once an element holds text or an inline element, its content is written
/// back untouched, so joining the lines again restores the original markup.
/// Input that is not well-formed XML is returned unchanged.
pub fn prettify_storage(html: &str) -> String {
    let mut reader = Reader::from_str(html);
    let mut layout = Layout::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => {
                if layout.write(event).is_err() {
                    return html.to_owned();
                }
            }
            Err(e) => {
                debug!(
                    "Storage body is not well-formed at {}: {}",
                    reader.buffer_position(),
                    e
                );
                return html.to_owned();
            }
        }
    }

    String::from_utf8(layout.writer.into_inner()).unwrap_or_else(|_| html.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_blocks_indented() {
        assert_eq!(
            prettify_storage("<ul><li>a</li><li>b</li></ul>"),
            "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_mixed_content_kept_inline() {
        assert_eq!(
            prettify_storage("<p>Hello <strong>x</strong> world</p><p>b</p>"),
            "<p>Hello <strong>x</strong> world</p>\n<p>b</p>"
        );
    }

    #[test]
    fn test_leading_inline_element_kept_inline() {
        let pretty = prettify_storage("<div><p><strong>x</strong> y</p></div>");
        assert_eq!(pretty, "<div>\n  <p><strong>x</strong> y</p>\n</div>");
        assert_eq!(
            pretty.split('\n').map(str::trim_start).collect::<String>(),
            "<div><p><strong>x</strong> y</p></div>"
        );
    }

    #[test]
    fn test_empty_elements() {
        assert_eq!(
            prettify_storage("<p></p><hr/><table><tbody><tr><td/></tr></tbody></table>"),
            "<p></p>\n<hr/>\n<table>\n  <tbody>\n    <tr>\n      <td/>\n    </tr>\n  \
             </tbody>\n</table>"
        );
    }

    #[test]
    fn test_macro_body_kept_inline() {
        let html = concat!(
            r#"<ac:structured-macro ac:name="code">"#,
            "<ac:plain-text-body><![CDATA[fn main() {}]]></ac:plain-text-body>",
            "</ac:structured-macro>"
        );
        assert_eq!(
            prettify_storage(html),
            "<ac:structured-macro ac:name=\"code\">\n  \
             <ac:plain-text-body><![CDATA[fn main() {}]]></ac:plain-text-body>\n\
             </ac:structured-macro>"
        );
    }

    #[test]
    fn test_reformatting_is_stable() {
        let pretty = prettify_storage("<ul><li><p>a</p></li></ul>");
        assert_eq!(pretty, "<ul>\n  <li>\n    <p>a</p>\n  </li>\n</ul>");
        assert_eq!(prettify_storage(&pretty), pretty);
    }

    #[test]
    fn test_entity_references_kept_inline() {
        assert_eq!(
            prettify_storage("<p>a&amp;b&nbsp;c</p>"),
            "<p>a&amp;b&nbsp;c</p>"
        );
    }

    #[test]
    fn test_malformed_input_unchanged() {
        let html = "<p><b>x</p>";
        assert_eq!(prettify_storage(html), html);
    }
}
