use once_cell::sync::Lazy;
use regex::Regex;

use crate::TextAnalysis;

/// Phrases over-represented in generated prose. Matched as substrings of the
/// lowercased input.
const AI_PHRASES: [&str; 21] = [
    "delve into",
    "it's important to note",
    "in conclusion",
    "furthermore",
    "comprehensive",
    "multifaceted",
    "utilize",
    "leverage",
    "robust",
    "seamless",
    "cutting-edge",
    "innovative solution",
    "game-changer",
    "revolutionize",
    "unlock the potential",
    "dive deep",
    "at the end of the day",
    "it is worth noting",
    "notably",
    "significantly",
    "substantial",
];

static CONTRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"n't|'re|'ve|'ll|'d|'m").unwrap());

static LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.|•|−|–|\*\s").unwrap());

static VAGUE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(things|stuff|very|really|actually|basically)\b").unwrap());

static PRONOUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(i|me|my|we|us|our)\b").unwrap());

/// Scores linguistic regularities typical of generated prose. Each rule that
/// fires adds a fixed weight and one human-readable indicator.
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let mut indicators = Vec::new();
        let mut score = 0u32;

        let lower = text.to_lowercase();

        // Lexicon match
        let found: Vec<String> = AI_PHRASES
            .iter()
            .filter(|phrase| lower.contains(**phrase))
            .map(|phrase| format!("\"{phrase}\""))
            .collect();

        if found.len() >= 3 {
            indicators.push(format!(
                "Contains {} common AI phrases: {}",
                found.len(),
                found[..3].join(", ")
            ));
            score += 25;
        } else if !found.is_empty() {
            indicators.push(format!("Contains AI-typical phrases: {}", found.join(", ")));
            score += 10;
        }

        let sentences: Vec<&str> = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .collect();

        // Sentence uniformity
        if sentences.len() > 3 {
            let avg_length = text.chars().count() as f64 / sentences.len() as f64;
            if avg_length > 80.0 && avg_length < 120.0 {
                indicators.push(format!(
                    "Sentences are uniformly structured (avg {} chars - typical of AI)",
                    avg_length.round() as i64
                ));
                score += 15;
            }
        }

        // Contraction scarcity
        let word_count = text.split_whitespace().count();
        let contraction_count = CONTRACTION_RE.find_iter(text).count();
        if word_count > 50 && contraction_count < 2 {
            indicators.push(format!(
                "Very few contractions ({contraction_count} in {word_count} words - AI tends to be formal)"
            ));
            score += 15;
        }

        // Structured lists
        let list_matches = LIST_MARKER_RE.find_iter(text).count();
        if list_matches > 3 && sentences.len() > 5 {
            indicators
                .push("Contains structured lists or bullet points (common in AI responses)".into());
            score += 10;
        }

        // Capitalization uniformity
        let capitalized = sentences
            .iter()
            .filter(|s| {
                s.trim()
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_uppercase())
            })
            .count();
        if capitalized == sentences.len() && sentences.len() > 5 {
            indicators
                .push("Perfect sentence capitalization consistency (suspiciously uniform)".into());
            score += 10;
        }

        // Vague-word scarcity
        let vague_count = VAGUE_WORD_RE.find_iter(&lower).count();
        if word_count > 30 && vague_count < 1 {
            indicators.push("Lacks casual filler words (suspiciously polished writing)".into());
            score += 15;
        }

        // Pronoun scarcity
        let pronoun_count = PRONOUN_RE.find_iter(&lower).count();
        if word_count > 50 && pronoun_count < 2 {
            indicators.push("Limited personal pronouns (AI often writes in third person)".into());
            score += 10;
        }

        let score = score.min(100);
        if indicators.is_empty() {
            indicators.push("No strong AI text indicators detected - appears natural".into());
        }

        TextAnalysis {
            likely: score > 40,
            score,
            indicators,
        }
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let analysis = TextAnalyzer::new().analyze("");
        assert_eq!(analysis.score, 0);
        assert!(!analysis.likely);
        assert_eq!(
            analysis.indicators,
            vec!["No strong AI text indicators detected - appears natural".to_string()]
        );
    }

    #[test]
    fn lexicon_match_is_case_insensitive() {
        let analysis = TextAnalyzer::new().analyze("Leverage this. Furthermore, Robust tooling.");
        assert_eq!(analysis.score, 25);
        assert!(!analysis.likely);
        assert!(analysis.indicators[0].starts_with("Contains 3 common AI phrases:"));
        assert!(analysis.indicators[0].contains("\"furthermore\""));
    }

    #[test]
    fn single_phrase_adds_ten() {
        let analysis = TextAnalyzer::new().analyze("We should leverage that idea.");
        assert_eq!(analysis.score, 10);
        assert_eq!(
            analysis.indicators[0],
            "Contains AI-typical phrases: \"leverage\""
        );
    }

    #[test]
    fn repetitive_plain_prose_stays_below_threshold() {
        let text = "the cat sat ".repeat(30);
        let analysis = TextAnalyzer::new().analyze(&text);
        // contraction scarcity (+15), filler scarcity (+15), pronoun scarcity (+10)
        assert_eq!(analysis.score, 40);
        assert!(!analysis.likely);
    }

    #[test]
    fn formal_listicle_scores_as_likely() {
        let mut text = String::from(
            "Furthermore, comprehensive analysis can revolutionize workflows and unlock the potential of robust systems. ",
        );
        for n in 1..=6 {
            text.push_str(&format!(
                "{n}. This step delivers substantial improvements across the organization today. "
            ));
        }
        let analysis = TextAnalyzer::new().analyze(&text);
        assert!(analysis.score > 40, "score was {}", analysis.score);
        assert!(analysis.likely);
        assert!(analysis.score <= 100);
        assert!(
            analysis
                .indicators
                .iter()
                .any(|i| i.contains("structured lists"))
        );
    }

    #[test]
    fn score_is_clamped_and_likely_tracks_score() {
        for text in [
            "",
            "hi there",
            &"Seamless cutting-edge comprehensive robust notably significantly substantial \
              leverage utilize furthermore. "
                .repeat(10),
        ] {
            let analysis = TextAnalyzer::new().analyze(text);
            assert!(analysis.score <= 100);
            assert_eq!(analysis.likely, analysis.score > 40);
        }
    }
}
