//! Best-effort plain-text body extraction from a message's part tree.
//!
//! Depth-first, first-match search: at each level plain text beats HTML, even
//! when the HTML sibling comes first, and siblings are tried in order rather
//! than merged. Nested containers are recursed into only when the current
//! level has no decodable text of its own.

use crate::extract::decode_base64url;
use crate::gmail::types::MessagePart;

/// Extract the best-effort text body from the root's subtree.
///
/// Returns an empty string when no text part is found anywhere.
pub fn extract_body(root: &MessagePart) -> String {
    for part in &root.parts {
        if part.mime_type == "text/plain" {
            if let Some(text) = decode_inline_text(part) {
                return text;
            }
        }
    }

    for part in &root.parts {
        if part.mime_type == "text/html" {
            if let Some(html) = decode_inline_text(part) {
                return html_to_text(&html);
            }
        }
    }

    for part in &root.parts {
        if !part.parts.is_empty() {
            let nested = extract_body(part);
            if !nested.is_empty() {
                return nested;
            }
        }
    }

    String::new()
}

/// Decode a part's inline base64url payload as UTF-8, lossily.
///
/// Invalid byte sequences are replaced rather than erroring; `None` only when
/// the part has no inline data or the base64 itself is malformed.
fn decode_inline_text(part: &MessagePart) -> Option<String> {
    let data = part.inline_data()?;
    let bytes = decode_base64url(data)?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Tags whose boundaries separate blocks of text.
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "tr", "table", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "hr", "pre", "section", "article", "header", "footer",
];

/// Reduce an HTML document to its text content.
///
/// Tags are stripped, block-level tags collapse to single newline separators,
/// and the contents of `<script>`/`<style>` elements are excluded. Common
/// named entities are decoded.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;
    // Set while inside <script> or <style>, holding the tag that closes it.
    let mut skip_until: Option<&str> = None;

    while let Some(lt) = rest.find('<') {
        if skip_until.is_none() {
            push_text(&mut out, &rest[..lt]);
        }
        rest = &rest[lt + 1..];

        let Some(gt) = rest.find('>') else {
            // Unterminated tag; drop the remainder.
            return out.trim().to_string();
        };
        let tag = &rest[..gt];
        rest = &rest[gt + 1..];

        let (closing, name) = tag_name(tag);
        match skip_until {
            Some(target) => {
                if closing && name == target {
                    skip_until = None;
                }
            }
            None if !closing && name == "script" => skip_until = Some("script"),
            None if !closing && name == "style" => skip_until = Some("style"),
            None => {
                if BLOCK_TAGS.contains(&name.as_str()) && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    if skip_until.is_none() {
        push_text(&mut out, rest);
    }
    out.trim().to_string()
}

/// Split a raw tag body into (is_closing, lower-cased name).
fn tag_name(tag: &str) -> (bool, String) {
    let trimmed = tag.trim_start();
    let closing = trimmed.starts_with('/');
    let trimmed = trimmed.trim_start_matches('/');
    let name: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (closing, name)
}

/// Append a text segment, decoding the common named entities.
fn push_text(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match rest.find(';') {
            Some(semi) if semi <= 7 => {
                if let Some(decoded) = decode_entity(&rest[..=semi]) {
                    out.push_str(decoded);
                    rest = &rest[semi + 1..];
                    continue;
                }
            }
            _ => {}
        }

        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
}

fn decode_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "&amp;" => Some("&"),
        "&lt;" => Some("<"),
        "&gt;" => Some(">"),
        "&quot;" => Some("\""),
        "&#39;" | "&apos;" => Some("'"),
        "&nbsp;" => Some(" "),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE;

    fn leaf(mime_type: &str, raw: &[u8]) -> MessagePart {
        MessagePart {
            mime_type: mime_type.to_string(),
            body: Some(crate::gmail::types::PartBody {
                data: Some(URL_SAFE.encode(raw)),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn container(mime_type: &str, parts: Vec<MessagePart>) -> MessagePart {
        MessagePart {
            mime_type: mime_type.to_string(),
            parts,
            ..Default::default()
        }
    }

    // ── extract_body ────────────────────────────────────────────────

    #[test]
    fn returns_plain_text_child() {
        let root = container("multipart/alternative", vec![leaf("text/plain", b"hello")]);
        assert_eq!(extract_body(&root), "hello");
    }

    #[test]
    fn plain_text_beats_earlier_html_sibling() {
        let root = container(
            "multipart/alternative",
            vec![
                leaf("text/html", b"<p>html version</p>"),
                leaf("text/plain", b"plain version"),
            ],
        );
        assert_eq!(extract_body(&root), "plain version");
    }

    #[test]
    fn falls_back_to_html_when_no_plain_text() {
        let root = container(
            "multipart/alternative",
            vec![leaf("text/html", b"<p>only html</p>")],
        );
        assert_eq!(extract_body(&root), "only html");
    }

    #[test]
    fn recurses_into_nested_container() {
        let root = container(
            "multipart/mixed",
            vec![container(
                "multipart/alternative",
                vec![leaf("text/plain", b"nested text")],
            )],
        );
        assert_eq!(extract_body(&root), "nested text");
    }

    #[test]
    fn first_nonempty_nested_result_wins() {
        let root = container(
            "multipart/mixed",
            vec![
                container("multipart/related", vec![]),
                container("multipart/alternative", vec![leaf("text/plain", b"second")]),
            ],
        );
        // First nested container is empty; the walk moves on.
        assert_eq!(extract_body(&root), "second");
    }

    #[test]
    fn plain_part_without_data_is_skipped() {
        let empty_plain = MessagePart {
            mime_type: "text/plain".to_string(),
            ..Default::default()
        };
        let root = container(
            "multipart/alternative",
            vec![empty_plain, leaf("text/plain", b"has data")],
        );
        assert_eq!(extract_body(&root), "has data");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let root = container(
            "multipart/alternative",
            vec![leaf("text/plain", &[b'o', b'i', 0xff])],
        );
        assert_eq!(extract_body(&root), "oi\u{fffd}");
    }

    #[test]
    fn empty_tree_yields_empty_string() {
        let root = container("multipart/mixed", vec![]);
        assert_eq!(extract_body(&root), "");

        let no_text = container(
            "multipart/mixed",
            vec![leaf("application/pdf", b"%PDF-1.4")],
        );
        assert_eq!(extract_body(&no_text), "");
    }

    // ── html_to_text ────────────────────────────────────────────────

    #[test]
    fn strips_tags() {
        assert_eq!(html_to_text("<b>Bold</b> and <i>italic</i>"), "Bold and italic");
    }

    #[test]
    fn block_tags_become_newlines() {
        assert_eq!(
            html_to_text("<p>first</p><p>second</p><br>third"),
            "first\nsecond\nthird"
        );
    }

    #[test]
    fn consecutive_block_tags_collapse() {
        assert_eq!(html_to_text("<div><p>only</p></div><p></p>end"), "only\nend");
    }

    #[test]
    fn script_content_is_excluded() {
        assert_eq!(
            html_to_text("<p>before</p><script>var x = 1;</script><p>after</p>"),
            "before\nafter"
        );
    }

    #[test]
    fn style_content_is_excluded() {
        assert_eq!(
            html_to_text("<style>body { color: red }</style>text"),
            "text"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(html_to_text("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(html_to_text("caf&eacute;"), "caf&eacute;");
    }

    #[test]
    fn inline_tags_do_not_break_lines() {
        assert_eq!(html_to_text("one <a href=\"x\">two</a> three"), "one two three");
    }

    #[test]
    fn unterminated_tag_drops_remainder() {
        assert_eq!(html_to_text("ok <span"), "ok");
    }
}
