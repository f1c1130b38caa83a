use catalog_models::{CellValue, EpisodeKey};
use crate::policy::{fold, MergePolicy};

/// Read an episode key out of a free-text cell.
///
/// Full-length spellings win; otherwise the first run of ASCII digits
/// anywhere in the text is the episode number ("Tập 12", "EP12", "12").
/// Returns `None` for blank cells, text without digits, zero, and numbers
/// that do not fit in a `u32`.
pub fn parse_episode_key(cell: &CellValue, policy: &MergePolicy) -> Option<EpisodeKey> {
    let text = cell.as_text()?;
    parse_episode_text(&text, policy)
}

pub fn parse_episode_text(text: &str, policy: &MergePolicy) -> Option<EpisodeKey> {
    let folded = fold(text);
    if folded.is_empty() {
        return None;
    }
    if policy.is_full_length(&folded) {
        return Some(EpisodeKey::FullLength);
    }

    let digits: String = folded
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(EpisodeKey::Number(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<EpisodeKey> {
        parse_episode_text(text, &MergePolicy::default())
    }

    #[test]
    fn test_digit_run_anywhere() {
        assert_eq!(parse("12"), Some(EpisodeKey::Number(12)));
        assert_eq!(parse("Tập 12"), Some(EpisodeKey::Number(12)));
        assert_eq!(parse("EP12"), Some(EpisodeKey::Number(12)));
        assert_eq!(parse(" ep 3 - part 2 "), Some(EpisodeKey::Number(3)));
        assert_eq!(parse("007"), Some(EpisodeKey::Number(7)));
    }

    #[test]
    fn test_full_length_spellings() {
        assert_eq!(parse("FULL"), Some(EpisodeKey::FullLength));
        assert_eq!(parse("  Full  Movie "), Some(EpisodeKey::FullLength));
        assert_eq!(parse("Trọn Bộ"), Some(EpisodeKey::FullLength));
        // only exact spellings count, anything else falls back to digits
        assert_eq!(parse("full 2"), Some(EpisodeKey::Number(2)));
    }

    #[test]
    fn test_failures() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("Tập cuối"), None);
        assert_eq!(parse("0"), None);
        assert_eq!(parse("99999999999"), None);
    }

    #[test]
    fn test_numeric_and_boolean_cells() {
        let policy = MergePolicy::default();
        assert_eq!(parse_episode_key(&CellValue::Number(4.0), &policy), Some(EpisodeKey::Number(4)));
        assert_eq!(parse_episode_key(&CellValue::Bool(true), &policy), None);
        assert_eq!(parse_episode_key(&CellValue::Empty, &policy), None);
    }
}
