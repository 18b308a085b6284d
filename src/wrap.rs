use crate::font::Font;

/// Greedy word wrap against a pixel width budget.
///
/// Words are appended to the current line while the measured line still fits
/// `max_width`; a word that does not fit closes the line and starts the next
/// one. A single word wider than the budget is emitted alone on its own
/// overflowing line, never split mid-word. Whitespace runs collapse to single
/// spaces.
pub fn wrap_words(text: &str, font: &Font, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if font.text_width(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> Font {
        Font::builtin(24.0)
    }

    #[test]
    fn empty_text_wraps_to_no_lines() {
        assert!(wrap_words("", &font(), 100).is_empty());
        assert!(wrap_words("   ", &font(), 100).is_empty());
    }

    #[test]
    fn every_line_fits_unless_single_word_overflows() {
        let f = font();
        let max = f.text_width("mmmmmmmmmm");
        let text = "the quick brown fox jumps over a honorificabilitudinitatibus fence";
        for line in wrap_words(text, &f, max) {
            let fits = f.text_width(&line) <= max;
            let single_word = !line.contains(' ');
            assert!(fits || single_word, "line '{line}' breaks the contract");
        }
    }

    #[test]
    fn joined_lines_reproduce_normalized_text() {
        let f = font();
        let text = "  keep   the original\twords  in order ";
        let joined = wrap_words(text, &f, 80).join(" ");
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(joined, normalized);
    }

    #[test]
    fn wide_budget_yields_single_line() {
        let f = font();
        let lines = wrap_words("a b c", &f, 10_000);
        assert_eq!(lines, vec!["a b c".to_string()]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let f = font();
        let max = f.text_width("abc");
        let lines = wrap_words("a incomprehensibilities b", &f, max);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "incomprehensibilities");
    }

    #[test]
    fn same_input_same_output() {
        let f = font();
        let a = wrap_words("stable deterministic layout", &f, 120);
        let b = wrap_words("stable deterministic layout", &f, 120);
        assert_eq!(a, b);
    }
}
