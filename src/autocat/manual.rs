use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ElementReader, ElementWriter};

/// Applies a fixed edit to every game: optionally clear or remove
/// categories, then add the listed ones.
///
/// This is the one scheme whose removals are unconditional rather than
/// derived from database metadata.
#[derive(Clone)]
pub struct AutoCatManual {
    core: AutoCatCore,
    pub remove_all: bool,
    pub remove: Vec<String>,
    pub add: Vec<String>,
}

impl AutoCatManual {
    pub const TYPE_ID: &'static str = "AutoCatManual";

    pub fn new(name: &str) -> Self {
        AutoCatManual {
            core: AutoCatCore::new(name),
            remove_all: false,
            remove: Vec::new(),
            add: Vec::new(),
        }
    }

    pub fn with_remove_all(mut self, remove_all: bool) -> Self {
        self.remove_all = remove_all;
        self
    }

    pub fn with_remove(mut self, remove: &[&str]) -> Self {
        self.remove = remove.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_add(mut self, add: &[&str]) -> Self {
        self.add = add.iter().map(|name| name.to_string()).collect();
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatManual::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.remove_all = reader.boolean("RemoveAll", false);
        autocat.remove = reader.list("Remove");
        autocat.add = reader.list("Add");
        autocat
    }
}

impl AutoCat for AutoCatManual {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Manual
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

        if self.remove_all {
            binding.games.clear_categories(game.id)?;
        } else {
            for name in &self.remove {
                binding.games.remove_category(game.id, name)?;
            }
        }

        for name in &self.add {
            let category = binding.games.categories().get_or_create(name)?;
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
            .boolean("RemoveAll", self.remove_all)
            .list("Remove", &self.remove)
            .list("Add", &self.add)
            .finish()
    }
}
