use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ElementReader, ElementWriter};

/// Assigns one category for the release year.
///
/// Games without a known year get `prefix + unknown_text` when
/// `include_unknown` is set and the text is non-empty, otherwise nothing.
#[derive(Clone)]
pub struct AutoCatYear {
    core: AutoCatCore,
    pub prefix: String,
    pub include_unknown: bool,
    pub unknown_text: String,
}

impl AutoCatYear {
    pub const TYPE_ID: &'static str = "AutoCatYear";

    pub fn new(name: &str) -> Self {
        AutoCatYear {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            include_unknown: true,
            unknown_text: "Unknown".to_string(),
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

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatYear::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.include_unknown = reader.boolean("IncludeUnknown", true);
        autocat.unknown_text = reader.text("UnknownText", "Unknown");
        autocat
    }
}

impl AutoCat for AutoCatYear {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Year
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

        let label = match entry.release_year {
            Some(year) => year.to_string(),
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
        ElementWriter::new(Self::TYPE_ID)
            .text("Name", self.core.name())
            .opt_text("Filter", self.core.filter())
            .text("Prefix", &self.prefix)
            .boolean("IncludeUnknown", self.include_unknown)
            .text("UnknownText", &self.unknown_text)
            .finish()
    }
}
