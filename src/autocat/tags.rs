use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ElementReader, ElementWriter};

/// Assigns categories from the database entry's community tags.
///
/// Takes up to `max_tags` tags in declaration order (`0` = unlimited).
/// `included` narrows the eligible tags; unlike flags, an empty list
/// means every tag is eligible.
#[derive(Clone)]
pub struct AutoCatTags {
    core: AutoCatCore,
    pub prefix: String,
    pub max_tags: usize,
    pub included: Vec<String>,
}

impl AutoCatTags {
    pub const TYPE_ID: &'static str = "AutoCatTags";

    pub fn new(name: &str) -> Self {
        AutoCatTags {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            max_tags: 0,
            included: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.max_tags = max;
        self
    }

    pub fn with_included(mut self, included: &[&str]) -> Self {
        self.included = included.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatTags::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.max_tags = reader.parsed("MaxTags", 0);
        autocat.included = reader.list("Tags");
        autocat
    }

    fn eligible(&self, tag: &String) -> bool {
        self.included.is_empty() || self.included.contains(tag)
    }
}

impl AutoCat for AutoCatTags {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Tags
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

        let mut taken = 0;
        for tag in entry.tags.iter().filter(|tag| self.eligible(tag)) {
            if self.max_tags != 0 && taken >= self.max_tags {
                break;
            }
            let category = binding
                .games
                .categories()
                .get_or_create(&format!("{}{}", self.prefix, tag))?;
            binding.games.add_category(game.id, &category)?;
            taken += 1;
        }

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
            .number("MaxTags", self.max_tags)
            .list("Tags", &self.included)
            .finish()
    }
}
