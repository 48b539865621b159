//! HTML rendering of run-length encoded images, plus the markup compaction
//! pass whose output length the size search optimizes against.

use crate::rle::RleImage;

/// Render an RLE image as HTML.
///
/// Each row becomes a fixed-height `<div>`; each run becomes an
/// inline-block `<span>` whose width is `run.count * pixel_scale` pixels,
/// with its color as a `#rrggbb` background. The rows sit inside a single
/// `line-height:0` wrapper so block heights are exact.
///
/// The output is indented and readable; callers that care about byte size
/// pass it through [`minify`] afterwards.
pub fn render_html(image: &RleImage, pixel_scale: usize) -> String {
    let mut out = String::new();
    out.push_str("<div style=\"line-height:0\">\n");
    for row in &image.rows {
        out.push_str("  <div style=\"height:");
        push_number(&mut out, pixel_scale);
        out.push_str("px\">\n");
        for run in row {
            out.push_str("    <span style=\"display:inline-block;height:");
            push_number(&mut out, pixel_scale);
            out.push_str("px;width:");
            push_number(&mut out, run.count * pixel_scale);
            out.push_str("px;background:");
            push_hex_color(&mut out, run.r, run.g, run.b);
            out.push_str("\"></span>\n");
        }
        out.push_str("  </div>\n");
    }
    out.push_str("</div>\n");
    out
}

/// Compact markup: strip comments, collapse whitespace, and drop quotes
/// around attribute values that don't need them.
///
/// This is a size-reduction lever the byte-budget search relies on, not a
/// cosmetic cleanup. It never alters rendered semantics: quotes stay in
/// place whenever the value contains whitespace or `"'\`=<>` characters,
/// and text-node whitespace collapses to a single space unless it sits
/// between two tags.
pub fn minify(html: &str) -> String {
    let html = strip_comments(html);
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();
    let mut in_tag = false;

    while let Some(c) = chars.next() {
        if in_tag {
            match c {
                '>' => {
                    in_tag = false;
                    out.push('>');
                }
                '"' | '\'' => {
                    let mut value = String::new();
                    for n in chars.by_ref() {
                        if n == c {
                            break;
                        }
                        value.push(n);
                    }
                    if needs_quotes(&value) {
                        out.push(c);
                        out.push_str(&value);
                        out.push(c);
                    } else {
                        out.push_str(&value);
                    }
                }
                c if c.is_whitespace() => {
                    while chars.peek().is_some_and(|n| n.is_whitespace()) {
                        chars.next();
                    }
                    // no space needed right before the closing bracket
                    if chars.peek() != Some(&'>') {
                        out.push(' ');
                    }
                }
                _ => out.push(c),
            }
        } else {
            match c {
                '<' => {
                    in_tag = true;
                    out.push('<');
                }
                c if c.is_whitespace() => {
                    while chars.peek().is_some_and(|n| n.is_whitespace()) {
                        chars.next();
                    }
                    let between_tags = (out.is_empty() || out.ends_with('>'))
                        && matches!(chars.peek(), None | Some('<'));
                    if !between_tags {
                        out.push(' ');
                    }
                }
                _ => out.push(c),
            }
        }
    }
    out
}

fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return out, // unterminated comment swallows the tail
        }
    }
    out.push_str(rest);
    out
}

/// An attribute value can go unquoted when it contains no whitespace and
/// none of the characters HTML reserves in unquoted values.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '=' | '<' | '>'))
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Append `#rrggbb`, each channel zero-padded to two lowercase hex digits.
fn push_hex_color(out: &mut String, r: u8, g: u8, b: u8) {
    out.push('#');
    for channel in [r, g, b] {
        out.push(HEX_DIGITS[(channel >> 4) as usize] as char);
        out.push(HEX_DIGITS[(channel & 0xf) as usize] as char);
    }
}

/// Fast number to string without allocation
fn push_number(out: &mut String, mut n: usize) {
    if n == 0 {
        out.push('0');
        return;
    }
    let mut buf = [0u8; 20];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    for &digit in &buf[i..] {
        out.push(digit as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::{RleImage, Run};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_single_red_run() {
        // 2x1 all-red image at pixel scale 4: one row, one 8px-wide block.
        let rle = RleImage {
            width: 2,
            rows: vec![vec![Run {
                r: 255,
                g: 0,
                b: 0,
                count: 2,
            }]],
        };
        let html = render_html(&rle, 4);
        assert!(html.contains("height:4px"));
        assert!(html.contains("width:8px"));
        assert!(html.contains("background:#ff0000"));
        assert_eq!(html.matches("<span").count(), 1);
    }

    #[test]
    fn hex_channels_are_zero_padded() {
        let mut s = String::new();
        push_hex_color(&mut s, 0, 10, 255);
        assert_eq!(s, "#000aff");
    }

    #[test]
    fn minify_drops_intertag_whitespace() {
        let compact = minify("<div>\n  <span></span>\n</div>\n");
        assert_eq!(compact, "<div><span></span></div>");
    }

    #[test]
    fn minify_strips_comments() {
        let compact = minify("<div><!-- generated --><span></span></div>");
        assert_eq!(compact, "<div><span></span></div>");
    }

    #[test]
    fn minify_unquotes_safe_attribute_values() {
        let compact = minify("<span style=\"height:8px;background:#ff0000\"></span>");
        assert_eq!(compact, "<span style=height:8px;background:#ff0000></span>");
    }

    #[test]
    fn minify_keeps_quotes_when_value_has_spaces() {
        let compact = minify("<p title=\"a b\"></p>");
        assert_eq!(compact, "<p title=\"a b\"></p>");
    }

    #[test]
    fn minify_collapses_text_whitespace_to_one_space() {
        let compact = minify("<p>hello   \n world</p>");
        assert_eq!(compact, "<p>hello world</p>");
    }

    #[test]
    fn minified_render_is_smaller() {
        let rle = RleImage {
            width: 3,
            rows: vec![
                vec![
                    Run {
                        r: 1,
                        g: 2,
                        b: 3,
                        count: 2,
                    },
                    Run {
                        r: 4,
                        g: 5,
                        b: 6,
                        count: 1,
                    },
                ],
                vec![Run {
                    r: 7,
                    g: 8,
                    b: 9,
                    count: 3,
                }],
            ],
        };
        let raw = render_html(&rle, 8);
        let compact = minify(&raw);
        assert!(
            compact.len() < raw.len(),
            "minification must reduce byte size ({} -> {})",
            raw.len(),
            compact.len()
        );
        assert!(!compact.contains('\n'));
    }
}
