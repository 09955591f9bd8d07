//! Storage format element writers.
//!
//! Elements whose storage representation differs from plain XHTML:
//! - `ac:structured-macro` for code blocks
//! - `ac:image` with `ri:url` or `ri:attachment` for images
//! - self-closing `<br />` and `<hr />`

use std::fmt::Write;

use crate::state::escape_html;

/// Write a code block as the `code` macro.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    out.push_str(r#"<ac:structured-macro ac:name="code" ac:schema-version="1">"#);
    if let Some(lang) = lang {
        let _ = write!(
            out,
            r#"<ac:parameter ac:name="language">{}</ac:parameter>"#,
            escape_html(lang)
        );
    }
    // CDATA content is not escaped, but cannot contain its own terminator
    let content = content.replace("]]>", "]]]]><![CDATA[>");
    let _ = write!(
        out,
        r"<ac:plain-text-body><![CDATA[{content}]]></ac:plain-text-body>"
    );
    out.push_str("</ac:structured-macro>");
}

/// Write an image; local paths become attachment references.
pub(crate) fn image(src: &str, out: &mut String) {
    let is_external = src.starts_with("http://") || src.starts_with("https://");
    let inner = if is_external {
        format!(r#"ri:url ri:value="{}""#, escape_html(src))
    } else {
        let filename = src.rsplit('/').next().unwrap_or(src);
        format!(r#"ri:attachment ri:filename="{}""#, escape_html(filename))
    };
    let _ = write!(out, "<ac:image><{inner} /></ac:image>");
}

pub(crate) fn hard_break(out: &mut String) {
    out.push_str("<br />");
}

pub(crate) fn horizontal_rule(out: &mut String) {
    out.push_str("<hr />");
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    out.push_str(if checked { "[x] " } else { "[ ] " });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("python"), "print('hello')", &mut out);
        assert_eq!(
            out,
            concat!(
                r#"<ac:structured-macro ac:name="code" ac:schema-version="1">"#,
                r#"<ac:parameter ac:name="language">python</ac:parameter>"#,
                r"<ac:plain-text-body><![CDATA[print('hello')]]></ac:plain-text-body>",
                "</ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        code_block(None, "plain code", &mut out);
        assert!(!out.contains(r#"ac:name="language""#));
        assert!(out.contains("<![CDATA[plain code]]>"));
    }

    #[test]
    fn test_code_block_splits_cdata_terminator() {
        let mut out = String::new();
        code_block(None, "a]]>b", &mut out);
        assert!(out.contains("<![CDATA[a]]]]><![CDATA[>b]]>"));
    }

    #[test]
    fn test_external_image() {
        let mut out = String::new();
        image("https://example.com/image.png", &mut out);
        assert_eq!(
            out,
            r#"<ac:image><ri:url ri:value="https://example.com/image.png" /></ac:image>"#
        );
    }

    #[test]
    fn test_local_image() {
        let mut out = String::new();
        image("./images/diagram.png", &mut out);
        assert_eq!(
            out,
            r#"<ac:image><ri:attachment ri:filename="diagram.png" /></ac:image>"#
        );
    }

    #[test]
    fn test_task_list_marker() {
        let mut out = String::new();
        task_list_marker(true, &mut out);
        task_list_marker(false, &mut out);
        assert_eq!(out, "[x] [ ] ");
    }
}
