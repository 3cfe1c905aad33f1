use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::database::GameDb;
use crate::error::AutoCatError;
use crate::library::{Filter, GameInfo, GameList};
use crate::persist::{ElementReader, ElementWriter};

/// Assigns categories from the database entry's genre list.
///
/// At most `max_categories` genres are taken in declaration order
/// (`0` = unlimited), skipping anything in `ignored`. With
/// `remove_other_genres`, genre categories the scheme did not assign in
/// this pass are removed from the game; that set is derived from the
/// whole database in `pre_process`.
pub struct AutoCatGenre {
    core: AutoCatCore,
    pub prefix: String,
    pub max_categories: usize,
    pub remove_other_genres: bool,
    pub ignored: Vec<String>,
    genre_categories: Vec<String>,
}

impl AutoCatGenre {
    pub const TYPE_ID: &'static str = "AutoCatGenre";

    pub fn new(name: &str) -> Self {
        AutoCatGenre {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            max_categories: 0,
            remove_other_genres: false,
            ignored: Vec::new(),
            genre_categories: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_max_categories(mut self, max: usize) -> Self {
        self.max_categories = max;
        self
    }

    pub fn with_remove_other_genres(mut self, remove: bool) -> Self {
        self.remove_other_genres = remove;
        self
    }

    pub fn with_ignored(mut self, ignored: &[&str]) -> Self {
        self.ignored = ignored.iter().map(|genre| genre.to_string()).collect();
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatGenre::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.max_categories = reader.parsed("MaxCategories", 0);
        autocat.remove_other_genres = reader.boolean("RemoveOthers", false);
        autocat.ignored = reader.list("Ignored");
        autocat
    }

    fn category_name(&self, genre: &str) -> String {
        format!("{}{}", self.prefix, genre)
    }
}

impl AutoCat for AutoCatGenre {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Genre
    }

    fn pre_process(&mut self, games: Arc<GameList>, db: Arc<GameDb>) -> Result<(), AutoCatError> {
        if self.remove_other_genres {
            let mut seen = BTreeSet::new();
            for entry in db.iter() {
                for genre in &entry.genres {
                    if !self.ignored.contains(genre) {
                        seen.insert(self.category_name(genre));
                    }
                }
            }
            self.genre_categories = seen.into_iter().collect();
        }

        self.core.bind(games, db);
        Ok(())
    }

    fn de_process(&mut self) {
        self.genre_categories.clear();
        self.core.unbind();
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

        let eligible: Vec<&String> = entry
            .genres
            .iter()
            .filter(|genre| !self.ignored.contains(genre))
            .collect();
        let take = if self.max_categories == 0 {
            eligible.len()
        } else {
            self.max_categories.min(eligible.len())
        };

        let mut assigned = Vec::with_capacity(take);
        for genre in &eligible[..take] {
            let name = self.category_name(genre);
            let category = binding.games.categories().get_or_create(&name)?;
            binding.games.add_category(game.id, &category)?;
            assigned.push(name);
        }

        if self.remove_other_genres {
            for name in &self.genre_categories {
                if !assigned.contains(name) {
                    binding.games.remove_category(game.id, name)?;
                }
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
            .number("MaxCategories", self.max_categories)
            .boolean("RemoveOthers", self.remove_other_genres)
            .list("Ignored", &self.ignored)
            .finish()
    }
}

impl Clone for AutoCatGenre {
    fn clone(&self) -> Self {
        AutoCatGenre {
            core: self.core.clone(),
            prefix: self.prefix.clone(),
            max_categories: self.max_categories,
            remove_other_genres: self.remove_other_genres,
            ignored: self.ignored.clone(),
            // Derived per run, not part of the configuration.
            genre_categories: Vec::new(),
        }
    }
}
