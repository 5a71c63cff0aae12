//! Local answer analysis: sentiment polarity and keyword frequency.

use crate::models::Answers;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const MAX_KEYWORDS: usize = 10;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static word pattern"));

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "easy", "fast", "efficient", "improve", "better", "best",
    "happy", "useful", "simple", "reliable", "secure", "success",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "slow", "difficult", "hard", "problem", "issue", "error", "fail", "worse",
    "worst", "complex", "expensive", "manual", "risk",
];

const POSITIVE_TERMS_JA: &[&str] = &[
    "効率化", "改善", "向上", "便利", "簡単", "快適", "安心", "成功", "良い", "満足", "削減",
    "自動化", "迅速",
];

const NEGATIVE_TERMS_JA: &[&str] = &[
    "課題", "問題", "不便", "困難", "負担", "遅い", "ミス", "不安", "手作業", "煩雑", "非効率",
    "不満", "失敗",
];

/// Polarity of `text` in `[-1.0, 1.0]`.
///
/// Counts lexicon hits (English words by token, Japanese terms by
/// substring) and returns `(positive - negative) / (positive + negative)`,
/// or `0.0` when nothing matched.
pub fn sentiment_polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();

    let mut positive = 0usize;
    let mut negative = 0usize;
    for token in WORD.find_iter(&lowered).map(|m| m.as_str()) {
        if POSITIVE_WORDS.contains(&token) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&token) {
            negative += 1;
        }
    }
    positive += POSITIVE_TERMS_JA
        .iter()
        .map(|term| lowered.matches(term).count())
        .sum::<usize>();
    negative += NEGATIVE_TERMS_JA
        .iter()
        .map(|term| lowered.matches(term).count())
        .sum::<usize>();

    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }
    (positive as f64 - negative as f64) / total as f64
}

/// Polarity of each plain-string answer, in question order.
pub fn answer_sentiments(answers: &Answers) -> Vec<f64> {
    answers.string_answers().map(sentiment_polarity).collect()
}

/// The ten most frequent tokens across all answers.
///
/// Tokens are `\w+` runs of the lower-cased text, longer than one
/// character. Equal counts keep first-occurrence order.
pub fn extract_keywords(answers: &Answers) -> Vec<String> {
    let text = answers.text_fragments().join(" ").to_lowercase();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in WORD.find_iter(&text).map(|m| m.as_str()) {
        if token.chars().count() <= 1 {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Merges the model critique with the local scores and keywords.
pub fn combine_analysis(critique: &str, sentiments: &[f64], keywords: &[String]) -> String {
    let scores = sentiments
        .iter()
        .map(|score| format!("{:.2}", score))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "GPTによる分析:\n{}\n\n感情分析スコア:\n{}\n\n抽出されたキーワード:\n{}\n",
        critique,
        scores,
        keywords.join(", ")
    )
}
