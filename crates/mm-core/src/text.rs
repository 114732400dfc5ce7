//! Text measurement and line wrapping.
//!
//! The layout engine doesn't know about fonts; the drawing backend provides
//! a [`TextMeasure`]. Wrapping breaks on spaces only, so words are never
//! split across lines.

/// Measures the advance width of a single line of text.
pub trait TextMeasure {
    fn measure_width(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed-advance estimate: every char is `em_ratio × font_size` wide.
/// Deterministic, so it backs tests and headless rendering.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedTextMeasure {
    pub em_ratio: f64,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self { em_ratio: 0.6 }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.em_ratio
    }
}

/// Split `text` into the lines that fit within `max_width`.
///
/// Each round tries the whole remainder; if it is too wide the candidate is
/// shortened one char at a time from the end until it fits, then pulled back
/// to the nearest preceding space. The space at a break is consumed, so
/// joining the lines with single spaces gives back the input. A word wider
/// than `max_width` on its own is kept whole on its own line.
///
/// Empty input yields one empty line, so an empty node still gets a box of
/// one line height.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font_size: f64,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let fits = |s: &str| measure.measure_width(s, font_size) <= max_width;

    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if fits(rest) {
            lines.push(rest.to_string());
            break;
        }

        let mut end = rest.len();
        while end > 0 && !fits(&rest[..end]) {
            end = prev_char_boundary(rest, end);
        }

        let split = if rest[end..].starts_with(' ') {
            Some(end)
        } else {
            rest[..end].rfind(' ')
        };
        match split.or_else(|| rest.find(' ')) {
            Some(at) => {
                lines.push(rest[..at].to_string());
                rest = &rest[at + 1..];
                if rest.is_empty() {
                    // The break consumed a trailing space.
                    lines.push(String::new());
                }
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

fn prev_char_boundary(s: &str, end: usize) -> usize {
    s[..end].chars().next_back().map_or(0, |c| end - c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 10px font × 0.6 → 6px per char.
    const FONT: f64 = 10.0;

    fn wrap(text: &str, max_width: f64) -> Vec<String> {
        wrap_text(text, max_width, FONT, &EstimatedTextMeasure::default())
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("hello world", 600.0), vec!["hello world"]);
    }

    #[test]
    fn breaks_on_spaces() {
        // 10 chars fit per line.
        assert_eq!(
            wrap("the quick brown fox jumps", 60.0),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn break_exactly_at_space() {
        // "aaaaa bbbbb": the first 5 chars fit exactly and a space follows.
        assert_eq!(wrap("aaaaa bbbbb", 30.0), vec!["aaaaa", "bbbbb"]);
    }

    #[test]
    fn overlong_word_stays_whole() {
        assert_eq!(
            wrap("a supercalifragilistic word", 60.0),
            vec!["a", "supercalifragilistic", "word"]
        );
    }

    #[test]
    fn single_overlong_word_is_one_line() {
        assert_eq!(wrap("antidisestablishment", 30.0), vec!["antidisestablishment"]);
    }

    #[test]
    fn rejoining_reproduces_input() {
        let text = "mind maps arrange ideas around a central topic and branch outward";
        for max in [30.0, 61.0, 90.0, 150.0, 400.0] {
            let lines = wrap(text, max);
            assert_eq!(lines.join(" "), text, "max_width = {max}");
            for line in &lines {
                let w = EstimatedTextMeasure::default().measure_width(line, FONT);
                assert!(
                    w <= max || !line.contains(' '),
                    "line {line:?} is {w}px wide at max {max}"
                );
            }
        }
    }

    #[test]
    fn trailing_space_at_a_break_is_kept() {
        let lines = wrap("aaaaaa ", 30.0);
        assert_eq!(lines, vec!["aaaaaa", ""]);
        assert_eq!(lines.join(" "), "aaaaaa ");
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 100.0), vec![String::new()]);
    }

    #[test]
    fn zero_width_puts_every_word_on_its_own_line() {
        assert_eq!(wrap("one two three", 0.0), vec!["one", "two", "three"]);
    }

    #[test]
    fn multibyte_chars_do_not_split_inside_a_char() {
        let lines = wrap("ünïcödé wörds hère", 50.0);
        assert_eq!(lines.join(" "), "ünïcödé wörds hère");
    }
}
