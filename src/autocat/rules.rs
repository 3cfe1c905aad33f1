use serde::{Deserialize, Serialize};

/// One review-score bucket: an inclusive score range plus review-count
/// bounds.
///
/// Rule lists are evaluated in declaration order and the first match
/// wins; overlapping or duplicate rules are legal. `0` for a review
/// bound means no cap. A rule whose `min_score` exceeds its `max_score`
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScoreRule {
    pub name: String,
    pub min_score: u8,
    pub max_score: u8,
    pub min_reviews: u32,
    pub max_reviews: u32,
}

impl UserScoreRule {
    pub fn new(name: &str, min_score: u8, max_score: u8, min_reviews: u32, max_reviews: u32) -> Self {
        UserScoreRule {
            name: name.to_string(),
            min_score,
            max_score,
            min_reviews,
            max_reviews,
        }
    }

    pub fn matches(&self, score: u8, reviews: u32) -> bool {
        score >= self.min_score
            && score <= self.max_score
            && reviews >= self.min_reviews
            && (self.max_reviews == 0 || reviews <= self.max_reviews)
    }
}

/// One time-to-beat bucket, in hours. `0.0` for `max_hours` means no cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HltbRule {
    pub name: String,
    pub min_hours: f32,
    pub max_hours: f32,
}

impl HltbRule {
    pub fn new(name: &str, min_hours: f32, max_hours: f32) -> Self {
        HltbRule {
            name: name.to_string(),
            min_hours,
            max_hours,
        }
    }

    pub fn matches(&self, hours: f32) -> bool {
        hours >= self.min_hours && (self.max_hours == 0.0 || hours <= self.max_hours)
    }
}

/// The Steam store's nine review labels, highest tier first.
pub fn steam_labels_preset() -> Vec<UserScoreRule> {
    vec![
        UserScoreRule::new("Overwhelmingly Positive", 95, 100, 500, 0),
        UserScoreRule::new("Very Positive", 85, 100, 50, 0),
        UserScoreRule::new("Positive", 80, 100, 1, 0),
        UserScoreRule::new("Mostly Positive", 70, 79, 1, 0),
        UserScoreRule::new("Mixed", 40, 69, 1, 0),
        UserScoreRule::new("Mostly Negative", 20, 39, 1, 0),
        UserScoreRule::new("Overwhelmingly Negative", 0, 19, 500, 0),
        UserScoreRule::new("Very Negative", 0, 19, 50, 0),
        UserScoreRule::new("Negative", 0, 19, 1, 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds_are_inclusive() {
        let rule = UserScoreRule::new("band", 40, 69, 1, 0);

        assert!(rule.matches(40, 5));
        assert!(rule.matches(69, 5));
        assert!(!rule.matches(39, 5));
        assert!(!rule.matches(70, 5));
    }

    #[test]
    fn zero_max_reviews_means_no_cap() {
        let capped = UserScoreRule::new("capped", 0, 100, 10, 100);
        let uncapped = UserScoreRule::new("uncapped", 0, 100, 10, 0);

        assert!(!capped.matches(50, 101));
        assert!(uncapped.matches(50, 101));
        assert!(!uncapped.matches(50, 9));
    }

    #[test]
    fn inverted_score_range_never_matches() {
        let rule = UserScoreRule::new("inverted", 80, 20, 0, 0);

        for score in [0, 20, 50, 80, 100] {
            assert!(!rule.matches(score, 10));
        }
    }

    #[test]
    fn first_matching_preset_label_wins() {
        let rules = steam_labels_preset();

        // 96% with a large sample hits the top tier.
        let label = rules.iter().find(|rule| rule.matches(96, 1000)).unwrap();
        assert_eq!(label.name, "Overwhelmingly Positive");

        // The same score with fewer reviews falls through to the next tier.
        let label = rules.iter().find(|rule| rule.matches(96, 60)).unwrap();
        assert_eq!(label.name, "Very Positive");

        let label = rules.iter().find(|rule| rule.matches(10, 3)).unwrap();
        assert_eq!(label.name, "Negative");
    }

    #[test]
    fn hltb_rule_bounds() {
        let short = HltbRule::new("Short", 0.0, 5.0);
        let endless = HltbRule::new("Endless", 50.0, 0.0);

        assert!(short.matches(0.5));
        assert!(short.matches(5.0));
        assert!(!short.matches(5.1));
        assert!(endless.matches(400.0));
        assert!(!endless.matches(49.9));
    }
}
