use crate::domain::model::ValidationVerdict;

/// 有效分析所需的最少字數，與後端契約一致，呼叫端不可調整
pub const MIN_JD_WORDS: usize = 50;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 純函式，每次輸入變更都可呼叫以提供即時回饋
pub fn validate(text: &str) -> ValidationVerdict {
    let words = word_count(text);
    ValidationVerdict {
        valid: words >= MIN_JD_WORDS,
        word_count: words,
        char_count: text.chars().count(),
        deficit: MIN_JD_WORDS.saturating_sub(words),
    }
}
