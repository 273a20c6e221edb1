//! Two-line balancing for radar point labels.

/// Default label width used by the per-item radar.
pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 18;

/// Extra characters the first line may take beyond half the label.
const FIRST_LINE_SLACK: usize = 5;

/// Splits a long label into at most two lines joined by `'\n'`.
///
/// Labels that fit in `max_chars_per_line` come back unchanged. A single
/// token is cut at its character midpoint, even inside a word. Otherwise
/// words are packed into the first line while it stays within
/// `len / 2 + 5` characters and the rest goes to the second line. When every
/// word fits on the first line the label is returned as is.
///
/// Lengths are counted in `char`s and words are separated by single spaces,
/// so runs of spaces yield empty words that collapse when the first line is
/// trimmed.
pub fn wrap_label(label: &str, max_chars_per_line: usize) -> String {
    let len = label.chars().count();
    if len <= max_chars_per_line {
        return label.to_string();
    }

    let words: Vec<&str> = label.split(' ').collect();
    if words.len() == 1 {
        let split_at = byte_offset(label, len / 2);
        return format!("{}\n{}", &label[..split_at], &label[split_at..]);
    }

    let budget = len / 2 + FIRST_LINE_SLACK;
    let mut first_line = String::new();
    let mut second_line = String::new();

    for (i, word) in words.iter().enumerate() {
        let candidate = format!("{first_line} {word}");
        let candidate = candidate.trim();
        if candidate.chars().count() <= budget {
            first_line = candidate.to_string();
        } else {
            second_line = words[i..].join(" ");
            break;
        }
    }

    if second_line.is_empty() {
        label.to_string()
    } else {
        format!("{first_line}\n{second_line}")
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(label: &str) -> String {
        wrap_label(label, DEFAULT_MAX_CHARS_PER_LINE)
    }

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(wrap("CEO"), "CEO");
        assert_eq!(wrap("Data Scientist"), "Data Scientist");
        // exactly at the limit
        assert_eq!(wrap("Platform Architect"), "Platform Architect");
    }

    #[test]
    fn multi_word_labels_split_near_the_middle() {
        assert_eq!(wrap("Senior Backend Engineer"), "Senior Backend\nEngineer");
        assert_eq!(
            wrap("Machine Learning Engineer"),
            "Machine Learning\nEngineer"
        );
        assert_eq!(
            wrap("Chief Technology Officer Lead"),
            "Chief Technology\nOfficer Lead"
        );
    }

    #[test]
    fn single_token_splits_at_character_midpoint() {
        assert_eq!(
            wrap("Supercalifragilisticexpialidocious"),
            "Supercalifragilis\nticexpialidocious"
        );
        // odd length: the second half gets the extra character
        assert_eq!(wrap("abcdefghijklmnopqrs"), "abcdefghi\njklmnopqrs");
    }

    #[test]
    fn oversized_first_word_leaves_first_line_empty() {
        assert_eq!(
            wrap("Supercalifragilistic expert"),
            "\nSupercalifragilistic expert"
        );
    }

    #[test]
    fn label_is_kept_when_every_word_fits_the_first_line() {
        let label = format!("Ops{}Lead", " ".repeat(17));
        assert_eq!(label.chars().count(), 24);
        assert_eq!(wrap(&label), label);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(
            wrap("Développeuse Frontend Senior"),
            "Développeuse\nFrontend Senior"
        );

        let accented = "É".repeat(20);
        let half = "É".repeat(10);
        assert_eq!(wrap(&accented), format!("{half}\n{half}"));
    }

    #[test]
    fn custom_width_changes_the_threshold() {
        assert_eq!(wrap_label("Staff Engineer", 10), "Staff\nEngineer");
        assert_eq!(wrap_label("Senior Backend Engineer", 30), "Senior Backend Engineer");
    }
}
