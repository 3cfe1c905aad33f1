use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo};
use crate::persist::{ElementReader, ElementWriter};

/// Assigns categories for store flags ("Multiplayer", "VR Support", ...)
/// the user opted into.
///
/// Only flags present in `included` are assigned; an empty list selects
/// nothing.
#[derive(Clone)]
pub struct AutoCatFlags {
    core: AutoCatCore,
    pub prefix: String,
    pub included: Vec<String>,
}

impl AutoCatFlags {
    pub const TYPE_ID: &'static str = "AutoCatFlags";

    pub fn new(name: &str) -> Self {
        AutoCatFlags {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            included: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_included(mut self, included: &[&str]) -> Self {
        self.included = included.iter().map(|flag| flag.to_string()).collect();
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatFlags::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.included = reader.list("Flags");
        autocat
    }
}

impl AutoCat for AutoCatFlags {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Flags
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

        for flag in &entry.flags {
            if self.included.contains(flag) {
                let category = binding
                    .games
                    .categories()
                    .get_or_create(&format!("{}{}", self.prefix, flag))?;
                binding.games.add_category(game.id, &category)?;
            }
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
            .list("Flags", &self.included)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::autocat::registry::load_autocat_from_element;
    use crate::database::{GameDb, GameDbEntry};
    use crate::library::GameList;

    fn fixture() -> (Arc<GameList>, Arc<GameDb>) {
        let games = GameList::new();
        games.add_game(GameInfo::new(1, "Alpha")).unwrap();

        let mut db = GameDb::new();
        db.insert(
            GameDbEntry::new(1, "Alpha").with_flags(&["Multiplayer", "Co-op", "Steam Cloud"]),
        );
        (Arc::new(games), Arc::new(db))
    }

    #[test]
    fn assigns_only_included_flags() {
        let (games, db) = fixture();
        let mut autocat = AutoCatFlags::new("flags").with_included(&["Multiplayer", "VR"]);
        autocat.pre_process(games.clone(), db).unwrap();

        let game = games.game(1).unwrap().unwrap();
        let result = autocat.categorize_game(&game, None).unwrap();

        assert_eq!(result, CategorizeResult::Success);
        let categories = games.categories_of(1).unwrap();
        assert!(categories.contains("Multiplayer"));
        assert!(!categories.contains("Co-op"));
        assert!(!categories.contains("VR"));
    }

    #[test]
    fn empty_inclusion_list_selects_nothing() {
        let (games, db) = fixture();
        let mut autocat = AutoCatFlags::new("flags");
        autocat.pre_process(games.clone(), db).unwrap();

        let game = games.game(1).unwrap().unwrap();
        let result = autocat.categorize_game(&game, None).unwrap();

        assert_eq!(result, CategorizeResult::Success);
        assert!(games.categories_of(1).unwrap().is_empty());
    }

    #[test]
    fn prefix_is_prepended() {
        let (games, db) = fixture();
        let mut autocat = AutoCatFlags::new("flags")
            .with_prefix("f/")
            .with_included(&["Co-op"]);
        autocat.pre_process(games.clone(), db).unwrap();

        let game = games.game(1).unwrap().unwrap();
        autocat.categorize_game(&game, None).unwrap();

        assert!(games.categories_of(1).unwrap().contains("f/Co-op"));
    }

    #[test]
    fn element_round_trip() {
        let original = AutoCatFlags::new("flags")
            .with_prefix("f/")
            .with_included(&["Multiplayer", "Co-op"]);

        let element = original.write_to_element();
        let loaded = load_autocat_from_element(&element).unwrap();

        assert_eq!(loaded.kind(), AutoCatKind::Flags);
        assert_eq!(loaded.write_to_element(), element);
    }
}
