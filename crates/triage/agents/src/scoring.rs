//! Rule-based scoring of queries and drafted responses
//!
//! Two pure functions: [`query_sentiment`] reads the requester's mood off
//! the query text, [`response_quality`] grades a drafted response against
//! it. Both return scores in `[0.0, 1.0]`. The escalation router consumes
//! the quality score; the sentiment score only feeds the apology bonus
//! and the audit trail.

const NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "horrible",
    "angry",
    "furious",
    "ridiculous",
    "unacceptable",
    "disgusted",
    "worst",
    "never",
    "hate",
];
const POSITIVE_WORDS: &[&str] = &["thanks", "thank you", "please", "appreciate", "grateful", "good"];
const URGENCY_WORDS: &[&str] = &["immediately", "urgent", "asap", "now", "emergency"];

const APOLOGY_WORDS: &[&str] = &["apology", "apologize", "sorry"];
const SOLUTION_WORDS: &[&str] = &["steps", "process", "how to", "options"];
const TIMELINE_WORDS: &[&str] = &["within", "days", "hours", "shortly"];
const POLITE_WORDS: &[&str] = &["please", "thank you", "appreciate"];

fn count_present(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}

fn any_present(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Sentiment of the query text: 0.0 is hostile, 1.0 is friendly.
///
/// Starts from a neutral 0.7 and shifts by 0.15 down per negative word
/// present, 0.1 up per positive word, 0.1 down per urgency word. Each
/// word counts once no matter how often it appears.
pub fn query_sentiment(query: &str) -> f64 {
    let query = query.to_lowercase();

    let negative = count_present(&query, NEGATIVE_WORDS) as f64;
    let positive = count_present(&query, POSITIVE_WORDS) as f64;
    let urgent = count_present(&query, URGENCY_WORDS) as f64;

    let sentiment = 0.7 - negative * 0.15 + positive * 0.1 - urgent * 0.1;
    sentiment.clamp(0.0, 1.0)
}

/// Quality of a drafted response, given the sentiment of the query it
/// answers.
///
/// Starts at 0.75 and earns: 0.1 for apologizing to an unhappy requester
/// (sentiment below 0.6), 0.1 for offering concrete steps or options,
/// 0.05 for naming a timeline, 0.05 for politeness. Capped at 1.0.
pub fn response_quality(response: &str, query_sentiment: f64) -> f64 {
    let response = response.to_lowercase();

    let mut quality: f64 = 0.75;
    if query_sentiment < 0.6 && any_present(&response, APOLOGY_WORDS) {
        quality += 0.1;
    }
    if any_present(&response, SOLUTION_WORDS) {
        quality += 0.1;
    }
    if any_present(&response, TIMELINE_WORDS) {
        quality += 0.05;
    }
    if any_present(&response, POLITE_WORDS) {
        quality += 0.05;
    }
    quality.min(1.0)
}
