use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::autocat::rules::HltbRule;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ChildWriter, ElementReader, ElementWriter};

/// Buckets games by completion time through an ordered rule list.
///
/// The first matching hour bucket wins. Games without a known time get
/// `prefix + unknown_text` when `include_unknown` is set and the text is
/// non-empty, otherwise nothing.
#[derive(Clone)]
pub struct AutoCatHltb {
    core: AutoCatCore,
    pub prefix: String,
    pub include_unknown: bool,
    pub unknown_text: String,
    pub rules: Vec<HltbRule>,
}

impl AutoCatHltb {
    pub const TYPE_ID: &'static str = "AutoCatHltb";

    pub fn new(name: &str) -> Self {
        AutoCatHltb {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            include_unknown: true,
            unknown_text: "Unknown".to_string(),
            rules: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_include_unknown(mut self, include: bool) -> Self {
        self.include_unknown = include;
        self
    }

    pub fn with_unknown_text(mut self, text: &str) -> Self {
        self.unknown_text = text.to_string();
        self
    }

    pub fn with_rules(mut self, rules: Vec<HltbRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn add_rule(&mut self, rule: HltbRule) {
        self.rules.push(rule);
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatHltb::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.include_unknown = reader.boolean("IncludeUnknown", true);
        autocat.unknown_text = reader.text("UnknownText", "Unknown");
        autocat.rules = reader
            .children("Rule")
            .iter()
            .map(|rule| {
                HltbRule::new(
                    &rule.text("Text", ""),
                    rule.parsed("MinHours", 0.0),
                    rule.parsed("MaxHours", 0.0),
                )
            })
            .collect();
        autocat
    }
}

impl AutoCat for AutoCatHltb {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Hltb
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

        let label = match entry.time_to_beat {
            Some(hours) => match self.rules.iter().find(|rule| rule.matches(hours)) {
                Some(rule) => rule.name.clone(),
                None => return Ok(CategorizeResult::Success),
            },
            None => {
                if !self.include_unknown || self.unknown_text.is_empty() {
                    return Ok(CategorizeResult::Success);
                }
                self.unknown_text.clone()
            }
        };

        let category = binding
            .games
            .categories()
            .get_or_create(&format!("{}{}", self.prefix, label))?;
        binding.games.add_category(game.id, &category)?;

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
                    .number("MinHours", rule.min_hours)
                    .number("MaxHours", rule.max_hours)
                    .finish()
            })
            .collect();

        ElementWriter::new(Self::TYPE_ID)
            .text("Name", self.core.name())
            .opt_text("Filter", self.core.filter())
            .text("Prefix", &self.prefix)
            .boolean("IncludeUnknown", self.include_unknown)
            .text("UnknownText", &self.unknown_text)
            .children("Rule", rules)
            .finish()
    }
}
