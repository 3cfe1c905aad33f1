use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ElementReader, ElementWriter};

/// Groups games by the leading character of their name.
///
/// The chosen character is uppercased; `skip_the` looks past a leading
/// "The "; `group_numbers` folds digits into a single `#` bucket.
#[derive(Clone)]
pub struct AutoCatName {
    core: AutoCatCore,
    pub prefix: String,
    pub skip_the: bool,
    pub group_numbers: bool,
}

impl AutoCatName {
    pub const TYPE_ID: &'static str = "AutoCatName";

    pub fn new(name: &str) -> Self {
        AutoCatName {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            skip_the: true,
            group_numbers: false,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_skip_the(mut self, skip_the: bool) -> Self {
        self.skip_the = skip_the;
        self
    }

    pub fn with_group_numbers(mut self, group_numbers: bool) -> Self {
        self.group_numbers = group_numbers;
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatName::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.skip_the = reader.boolean("SkipThe", true);
        autocat.group_numbers = reader.boolean("GroupNumbers", false);
        autocat
    }

    /// The category label for a game name, or `None` for an empty name.
    fn label(&self, name: &str) -> Option<String> {
        let chars: Vec<char> = name.chars().collect();
        let mut index = 0;

        // Needs at least one character after the article to skip it.
        if self.skip_the && chars.len() > 4 {
            let lead: String = chars[..4].iter().collect();
            if lead.eq_ignore_ascii_case("the ") {
                index = 4;
            }
        }

        let chosen = *chars.get(index)?;
        if self.group_numbers && chosen.is_ascii_digit() {
            return Some("#".to_string());
        }
        Some(chosen.to_uppercase().collect())
    }
}

impl AutoCat for AutoCatName {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Name
    }

    fn categorize_game(
        &self,
        game: &GameInfo,
        _filter: Option<&Filter>,
    ) -> Result<CategorizeResult, AutoCatError> {
        let binding = self.core.binding()?;
        if !binding.db.contains(game.id) {
            return Ok(CategorizeResult::NotInDatabase);
        }

        if let Some(label) = self.label(&game.name) {
            let category = binding
                .games
                .categories()
                .get_or_create(&format!("{}{}", self.prefix, label))?;
            binding.games.add_category(game.id, &category)?;
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
            .boolean("SkipThe", self.skip_the)
            .boolean("GroupNumbers", self.group_numbers)
            .finish()
    }
}
