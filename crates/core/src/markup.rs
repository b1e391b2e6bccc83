//! Markup serialization of a composited grid.
//!
//! Styled cells are wrapped in `<span class="...">` runs. Neighbouring cells
//! with equal class sets share one run, so the tag count grows with the
//! number of distinct runs rather than the number of styled cells. Glyphs are
//! emitted as-is, without escaping and without row separators.

use crate::rich::{ClassSet, RichTextArea};

const CLOSE_TAG: &str = "</span>";

/// Serialize `area` into markup.
///
/// ```
/// use ascii_arcade_core::{markup, RichTextArea};
/// use ascii_arcade_types::Vector;
///
/// let mut area = RichTextArea::new(4, 1);
/// area.text_mut().place(Vector::ZERO, "ab c", false);
/// area.style(Vector::new(1.0, 0.0), ["red-glow"]);
/// area.style(Vector::new(2.0, 0.0), ["red-glow"]);
/// assert_eq!(markup::serialize(&area), "a<span class=\"red-glow\">b </span>c");
/// ```
pub fn serialize(area: &RichTextArea) -> String {
    let glyphs = area.text().chars();
    let spans = area.spans();
    let mut out = String::with_capacity(glyphs.len() + spans.len() * 8);

    let at = |index: Option<usize>| -> Option<&ClassSet> { index.and_then(|i| spans.get(&i)) };

    for (i, &ch) in glyphs.iter().enumerate() {
        let current = spans.get(&i);
        if let Some(classes) = current {
            if at(i.checked_sub(1)) != Some(classes) {
                push_open_tag(&mut out, classes);
            }
        }
        out.push(ch);
        if let Some(classes) = current {
            if at(i.checked_add(1)) != Some(classes) {
                out.push_str(CLOSE_TAG);
            }
        }
    }
    out
}

fn push_open_tag(out: &mut String, classes: &ClassSet) {
    out.push_str("<span class=\"");
    for (n, class) in classes.iter().enumerate() {
        if n > 0 {
            out.push(' ');
        }
        out.push_str(class);
    }
    out.push_str("\">");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextArea;
    use crate::types::Vector;

    #[test]
    fn unstyled_area_is_plain_text() {
        let area = RichTextArea::from_text_area(TextArea::from_text(3, 2, "abcdef"));
        assert_eq!(serialize(&area), "abcdef");
    }

    #[test]
    fn identical_neighbours_share_one_run() {
        let mut area = RichTextArea::from_text_area(TextArea::from_text(3, 1, "XXX"));
        area.fill(["red-glow"]);
        assert_eq!(serialize(&area), "<span class=\"red-glow\">XXX</span>");
    }

    #[test]
    fn differing_neighbours_split_runs() {
        let mut area = RichTextArea::from_text_area(TextArea::from_text(3, 1, "abc"));
        area.style(Vector::new(0.0, 0.0), ["a"]);
        area.style(Vector::new(1.0, 0.0), ["b"]);
        area.style(Vector::new(2.0, 0.0), ["b", "a"]);
        assert_eq!(
            serialize(&area),
            "<span class=\"a\">a</span><span class=\"b\">b</span><span class=\"a b\">c</span>"
        );
    }

    #[test]
    fn runs_continue_across_row_boundaries() {
        let mut area = RichTextArea::from_text_area(TextArea::from_text(2, 2, "abcd"));
        area.style(Vector::new(1.0, 1.0), ["x"]);
        area.style(Vector::new(0.0, 0.0), ["x"]);
        assert_eq!(serialize(&area), "a<span class=\"x\">bc</span>d");
    }
}
