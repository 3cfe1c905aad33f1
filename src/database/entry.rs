use serde::{Deserialize, Serialize};

use crate::library::GameId;

/// One game's reference metadata: the community and store-side facts the
/// categorization schemes read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDbEntry {
    pub id: GameId,
    pub name: String,
    pub genres: Vec<String>,
    pub flags: Vec<String>,
    pub tags: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub release_year: Option<i32>,
    /// Positive-review percentage, 0-100.
    pub review_score: u8,
    pub review_count: u32,
    /// Main-story completion time in hours, when known.
    pub time_to_beat: Option<f32>,
}

impl GameDbEntry {
    pub fn new(id: GameId, name: &str) -> Self {
        GameDbEntry {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = to_strings(genres);
        self
    }

    pub fn with_flags(mut self, flags: &[&str]) -> Self {
        self.flags = to_strings(flags);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = to_strings(tags);
        self
    }

    pub fn with_developers(mut self, developers: &[&str]) -> Self {
        self.developers = to_strings(developers);
        self
    }

    pub fn with_publishers(mut self, publishers: &[&str]) -> Self {
        self.publishers = to_strings(publishers);
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_review(mut self, score: u8, count: u32) -> Self {
        self.review_score = score;
        self.review_count = count;
        self
    }

    pub fn with_time_to_beat(mut self, hours: f32) -> Self {
        self.time_to_beat = Some(hours);
        self
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_fields() {
        let entry = GameDbEntry::new(620, "Portal 2")
            .with_genres(&["Puzzle"])
            .with_review(98, 250_000)
            .with_release_year(2011)
            .with_time_to_beat(8.5);

        assert_eq!(entry.id, 620);
        assert_eq!(entry.genres, vec!["Puzzle"]);
        assert_eq!(entry.review_score, 98);
        assert_eq!(entry.release_year, Some(2011));
        assert_eq!(entry.time_to_beat, Some(8.5));
        assert!(entry.tags.is_empty());
    }
}
