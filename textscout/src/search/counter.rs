/// Counts case-insensitive, non-overlapping occurrences of `needle` in
/// `content`.
///
/// Both sides are lowercased first. Scanning resumes right after each match,
/// so overlapping candidates are not counted twice: `"aa"` occurs once in
/// `"aaa"` and twice in `"aaaa"`. An empty needle counts as zero.
pub fn count_occurrences(content: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let needle = needle.to_lowercase();
    content.to_lowercase().matches(needle.as_str()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_count() {
        assert_eq!(count_occurrences("AbcAbcAbc", "abc"), 3);
        assert_eq!(count_occurrences("hello HELLO HeLLo", "Hello"), 3);
    }

    #[test]
    fn test_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("aaa", "aa"), 1);
    }

    #[test]
    fn test_no_match_and_empty() {
        assert_eq!(count_occurrences("hello world", "bye"), 0);
        assert_eq!(count_occurrences("", "bye"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_multi_word_and_unicode() {
        assert_eq!(count_occurrences("Hello World, hello world", "hello world"), 2);
        assert_eq!(count_occurrences("ÄPFEL und äpfel", "äpfel"), 2);
    }
}
