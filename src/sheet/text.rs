// sheet/text.rs - greedy word wrapping for fixed-size card cells

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to the last line when wrapping had to drop lines.
pub const ELLIPSIS: &str = "\u{2026}";

/// Number of grapheme clusters in a string, for character-count capacities.
pub fn grapheme_len(text: &str) -> f32 {
    text.graphemes(true).count() as f32
}

/// Wrap `text` into at most `max_lines` lines, none wider than `capacity`.
///
/// `measure` maps a candidate line to a width in whatever unit `capacity`
/// uses (measured point width from font metrics, or a plain grapheme count).
/// Lines are packed greedily: whole words joined by single spaces, a word is
/// appended only while the line stays within capacity (inclusive), and a word
/// that overflows a non-empty line closes it and opens the next one. A word
/// too wide for any line is hard-truncated to its widest fitting prefix. If
/// more than `max_lines` lines result, the excess is dropped and the last
/// kept line gets an ellipsis, shrinking it until line plus marker fit.
///
/// Empty or whitespace-only input yields a single empty line.
pub fn wrap_to_lines<F>(text: &str, capacity: f32, max_lines: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in words {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure(&candidate) <= capacity {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure(word) <= capacity {
            current = word.to_string();
        } else {
            // Word too wide for a line of its own: keep its widest prefix.
            lines.push(truncate_to_fit(word, capacity, &measure));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.pop() {
            lines.push(ellipsize(&last, capacity, &measure));
        }
    }

    lines
}

/// Longest grapheme prefix of `word` that fits `capacity`. May be empty.
fn truncate_to_fit<F>(word: &str, capacity: f32, measure: &F) -> String
where
    F: Fn(&str) -> f32,
{
    let graphemes: Vec<&str> = word.graphemes(true).collect();
    for cut in (1..=graphemes.len()).rev() {
        let prefix: String = graphemes[..cut].concat();
        if measure(&prefix) <= capacity {
            return prefix;
        }
    }
    String::new()
}

/// Append the ellipsis marker to `line`, shrinking the line until the result
/// fits `capacity` again.
fn ellipsize<F>(line: &str, capacity: f32, measure: &F) -> String
where
    F: Fn(&str) -> f32,
{
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    for cut in (0..=graphemes.len()).rev() {
        let prefix: String = graphemes[..cut].concat();
        let candidate = format!("{}{}", prefix.trim_end(), ELLIPSIS);
        if measure(&candidate) <= capacity {
            return candidate;
        }
    }
    // Not even the marker alone fits.
    truncate_to_fit(ELLIPSIS, capacity, measure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_chars(s: &str) -> f32 {
        grapheme_len(s)
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_to_lines("Something in the Way", 10.0, 3, by_chars);
        assert_eq!(lines, vec!["Something".to_string(), "in the Way".to_string()]);
    }

    #[test]
    fn empty_input_yields_single_empty_line() {
        assert_eq!(wrap_to_lines("", 10.0, 3, by_chars), vec![String::new()]);
        assert_eq!(wrap_to_lines("   \t ", 10.0, 3, by_chars), vec![String::new()]);
    }

    #[test]
    fn overlong_word_is_truncated_to_capacity() {
        let word = "a".repeat(40);
        let lines = wrap_to_lines(&word, 10.0, 3, by_chars);
        assert_eq!(lines, vec!["a".repeat(10)]);
    }

    #[test]
    fn overlong_word_after_a_full_line_is_truncated_too() {
        let lines = wrap_to_lines("short Supercalifragilistic", 8.0, 5, by_chars);
        assert_eq!(lines, vec!["short".to_string(), "Supercal".to_string()]);
    }

    #[test]
    fn excess_lines_are_dropped_with_ellipsis() {
        let lines = wrap_to_lines("one two three four", 5.0, 2, by_chars);
        assert_eq!(lines, vec!["one".to_string(), "two\u{2026}".to_string()]);
    }

    #[test]
    fn ellipsis_shrinks_last_line_until_it_fits() {
        // Last kept line fills capacity exactly, so the marker forces a cut.
        let lines = wrap_to_lines("abcde fghij klmno", 5.0, 2, by_chars);
        assert_eq!(lines, vec!["abcde".to_string(), "fghi\u{2026}".to_string()]);
    }

    #[test]
    fn every_line_fits_and_count_is_bounded() {
        let inputs = [
            "Smells Like Teen Spirit",
            "The Man Who Sold the World (Live at MTV Unplugged)",
            "愛という名のもとに とても長いタイトル",
            "x",
            "a b c d e f g h i j k l m n o p",
        ];
        for input in inputs {
            for capacity in [1.0_f32, 4.0, 9.0, 30.0] {
                for max_lines in [1usize, 2, 4] {
                    let lines = wrap_to_lines(input, capacity, max_lines, by_chars);
                    assert!(lines.len() <= max_lines, "{input:?} produced too many lines");
                    for line in &lines {
                        assert!(
                            grapheme_len(line) <= capacity,
                            "{line:?} wider than {capacity} for {input:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn wrapping_a_fitting_line_is_idempotent() {
        let lines = wrap_to_lines("in the Way", 10.0, 3, by_chars);
        assert_eq!(lines, vec!["in the Way".to_string()]);
    }

    #[test]
    fn measured_capacity_behaves_like_scaled_chars() {
        // 2pt per grapheme with capacity 20pt packs like 10 chars.
        let by_width = |s: &str| grapheme_len(s) * 2.0;
        let lines = wrap_to_lines("Something in the Way", 20.0, 3, by_width);
        assert_eq!(lines, vec!["Something".to_string(), "in the Way".to_string()]);
    }
}
