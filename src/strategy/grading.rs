//! Keyword-based condition scoring for raw card listings.

const BASE_SCORE: i32 = 50;

/// Estimates how likely a raw card is to grade well, from the seller's own
/// wording. Returns a score in 0..=100 where 50 means "no signal either way".
pub fn grading_potential(title: &str, description: &str) -> u8 {
    let text = format!("{} {}", title, description).to_lowercase();
    let mut score = BASE_SCORE;

    if text.contains("mint") || text.contains("nm/m") {
        score += 15;
    }
    if text.contains("centered") || text.contains("centering") {
        score += 10;
    }
    if text.contains("sharp corners") {
        score += 10;
    }
    if text.contains("no scratches") || text.contains("clean") {
        score += 10;
    }
    if text.contains("pack fresh") {
        score += 15;
    }

    if text.contains("damage") || text.contains("worn") {
        score -= 30;
    }
    if text.contains("played") || mentions_scratches(&text) {
        score -= 20;
    }
    if text.contains("off center") || contains_word(&text, "oc") {
        score -= 25;
    }

    score.clamp(0, 100) as u8
}

// "scratches" only counts against the card when the seller is not saying
// "no scratches".
fn mentions_scratches(text: &str) -> bool {
    text.contains("scratches") && !text.contains("no scratches")
}

// "oc" is seller shorthand for off-center, but only as a standalone word.
// A substring match would fire on half the hobby's vocabulary ("rockies",
// "holo charizard", "Brock").
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}
