//! Character-budget bookkeeping for paid submissions.
//!
//! Submission text is carried in a size-limited on-chain output, so the
//! client enforces a byte budget before requesting a payment quote. The
//! budget is spent by the description (plus the category annotation for
//! uploads) and by the binary CID, whose length the validation endpoint
//! reports.

/// Maximum encoded bytes for an upload description plus category annotation,
/// before subtracting the binary CID length.
pub const UPLOAD_BUDGET: usize = 214;

/// Maximum encoded bytes for a vote comment.
pub const COMMENT_BUDGET: usize = 177;

/// Byte length under the index's counting rule: UTF-16 code units plus UTF-8
/// continuation bytes.
///
/// This matches the true UTF-8 length for every BMP character ("abc" counts
/// 3, "é" counts 2) and counts supplementary-plane characters one byte high.
/// The overcount is kept on purpose: the remaining-characters display and the
/// server's acceptance threshold were both calibrated against this rule.
pub fn encoded_len(s: &str) -> usize {
    let units = s.encode_utf16().count();
    let continuations = s.bytes().filter(|b| b & 0xC0 == 0x80).count();
    units + continuations
}

/// Render a selected category as its embedded annotation. The annotation's
/// full encoded length counts against the upload budget.
pub fn category_annotation(category: &str) -> String {
    format!("<meta name=\"category\" content=\"{}\"/>", category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_counts_bytes() {
        assert_eq!(encoded_len(""), 0);
        assert_eq!(encoded_len("abc"), 3);
        assert_eq!(encoded_len("a b c"), 5);
    }

    #[test]
    fn test_two_byte_characters() {
        assert_eq!(encoded_len("é"), 2);
        assert_eq!(encoded_len("café"), 5);
    }

    #[test]
    fn test_three_byte_characters() {
        // CJK characters are three UTF-8 bytes and one UTF-16 unit.
        assert_eq!(encoded_len("日"), 3);
        assert_eq!(encoded_len("日本語"), 9);
    }

    #[test]
    fn test_supplementary_plane_overcount() {
        // One byte more than the true UTF-8 length of 4; see encoded_len.
        assert_eq!(encoded_len("😀"), 5);
    }

    #[test]
    fn test_category_annotation() {
        assert_eq!(
            category_annotation("Video"),
            r#"<meta name="category" content="Video"/>"#
        );
    }

    proptest! {
        // For ASCII text the rule is exactly the byte length.
        #[test]
        fn prop_ascii_is_byte_length(s in "[ -~]{0,300}") {
            prop_assert_eq!(encoded_len(&s), s.len());
        }

        // The rule never undercounts the true UTF-8 length for BMP text.
        #[test]
        fn prop_bmp_matches_utf8(s in "[\\u{20}-\\u{FFFD}]{0,100}") {
            prop_assert_eq!(encoded_len(&s), s.len());
        }
    }
}
