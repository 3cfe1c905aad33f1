use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::autocat::rules::UserScoreRule;
use crate::autocat::scoring::wilson_lower_bound;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ChildWriter, ElementReader, ElementWriter};

/// Buckets games by review score through an ordered rule list.
///
/// The first matching rule names zero or one categories per game. With
/// `use_wilson_score`, the raw percentage is replaced by the Wilson
/// lower bound before matching, which demotes scores backed by few
/// reviews.
#[derive(Clone)]
pub struct AutoCatUserScore {
    core: AutoCatCore,
    pub prefix: String,
    pub use_wilson_score: bool,
    pub rules: Vec<UserScoreRule>,
}

impl AutoCatUserScore {
    pub const TYPE_ID: &'static str = "AutoCatUserScore";

    pub fn new(name: &str) -> Self {
        AutoCatUserScore {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            use_wilson_score: false,
            rules: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_wilson_score(mut self, use_wilson: bool) -> Self {
        self.use_wilson_score = use_wilson;
        self
    }

    pub fn with_rules(mut self, rules: Vec<UserScoreRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn add_rule(&mut self, rule: UserScoreRule) {
        self.rules.push(rule);
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatUserScore::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.use_wilson_score = reader.boolean("UseWilsonScore", false);
        autocat.rules = reader
            .children("Rule")
            .iter()
            .map(|rule| {
                UserScoreRule::new(
                    &rule.text("Text", ""),
                    rule.parsed("MinScore", 0),
                    rule.parsed("MaxScore", 100),
                    rule.parsed("MinReviews", 0),
                    rule.parsed("MaxReviews", 0),
                )
            })
            .collect();
        autocat
    }
}

impl AutoCat for AutoCatUserScore {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::UserScore
    }

    fn categorize_game(
        &self,
        game: &GameInfo,
        _filter: Option<&Filter>,
    ) -> Result<CategorizeResult, AutoCatError> {
        let binding = self.core.binding()?;
        let entry = match binding.db.get(game.id) {
            Some(entry) => entry,
            None => return Ok(CategorizeResult::NotInDatabase),
        };

        let reviews = entry.review_count;
        let score = if self.use_wilson_score && reviews > 0 {
            wilson_lower_bound(entry.review_score, reviews)
        } else {
            entry.review_score
        };

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(score, reviews)) {
            let category = binding
                .games
                .categories()
                .get_or_create(&format!("{}{}", self.prefix, rule.name))?;
            binding.games.add_category(game.id, &category)?;
        }

        Ok(CategorizeResult::Success)
    }

    fn clone_boxed(&self) -> Box<dyn AutoCat> {
        Box::new(self.clone())
    }

    fn write_to_element(&self) -> Value {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                ChildWriter::new()
                    .text("Text", &rule.name)
                    .number("MinScore", rule.min_score)
                    .number("MaxScore", rule.max_score)
                    .number("MinReviews", rule.min_reviews)
                    .number("MaxReviews", rule.max_reviews)
                    .finish()
            })
            .collect();

        ElementWriter::new(Self::TYPE_ID)
            .text("Name", self.core.name())
            .opt_text("Filter", self.core.filter())
            .text("Prefix", &self.prefix)
            .boolean("UseWilsonScore", self.use_wilson_score)
            .children("Rule", rules)
            .finish()
    }
}
