use std::collections::HashMap;
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

/// Assigns developer and publisher names as categories.
///
/// Explicitly listed names always qualify. With `all_developers` /
/// `all_publishers`, any name occurring at least `min_count` times across
/// the bound library qualifies too (`0` or `1` = every occurrence);
/// occurrence counts are gathered in `pre_process`.
pub struct AutoCatDevPub {
    core: AutoCatCore,
    pub all_developers: bool,
    pub all_publishers: bool,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub min_count: u32,
    dev_counts: HashMap<String, u32>,
    pub_counts: HashMap<String, u32>,
}

impl AutoCatDevPub {
    pub const TYPE_ID: &'static str = "AutoCatDevPub";

    pub fn new(name: &str) -> Self {
        AutoCatDevPub {
            core: AutoCatCore::new(name),
            all_developers: false,
            all_publishers: false,
            developers: Vec::new(),
            publishers: Vec::new(),
            min_count: 0,
            dev_counts: HashMap::new(),
            pub_counts: HashMap::new(),
        }
    }

    pub fn with_all_developers(mut self, all: bool) -> Self {
        self.all_developers = all;
        self
    }

    pub fn with_all_publishers(mut self, all: bool) -> Self {
        self.all_publishers = all;
        self
    }

    pub fn with_developers(mut self, developers: &[&str]) -> Self {
        self.developers = developers.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_publishers(mut self, publishers: &[&str]) -> Self {
        self.publishers = publishers.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count;
        self
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatDevPub::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.all_developers = reader.boolean("AllDevelopers", false);
        autocat.all_publishers = reader.boolean("AllPublishers", false);
        autocat.developers = reader.list("Developers");
        autocat.publishers = reader.list("Publishers");
        autocat.min_count = reader.parsed("MinCount", 0);
        autocat
    }

    fn frequent(&self, counts: &HashMap<String, u32>, name: &str) -> bool {
        if self.min_count <= 1 {
            return true;
        }
        counts.get(name).copied().unwrap_or(0) >= self.min_count
    }
}

impl AutoCat for AutoCatDevPub {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::DevPub
    }

    fn pre_process(&mut self, games: Arc<GameList>, db: Arc<GameDb>) -> Result<(), AutoCatError> {
        if self.all_developers || self.all_publishers {
            for id in games.ids()? {
                let entry = match db.get(id) {
                    Some(entry) => entry,
                    None => continue,
                };
                for dev in &entry.developers {
                    *self.dev_counts.entry(dev.clone()).or_insert(0) += 1;
                }
                for publisher in &entry.publishers {
                    *self.pub_counts.entry(publisher.clone()).or_insert(0) += 1;
                }
            }
        }

        self.core.bind(games, db);
        Ok(())
    }

    fn de_process(&mut self) {
        self.dev_counts.clear();
        self.pub_counts.clear();
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

        for dev in &entry.developers {
            let qualifies = self.developers.contains(dev)
                || (self.all_developers && self.frequent(&self.dev_counts, dev));
            if qualifies {
                let category = binding.games.categories().get_or_create(dev)?;
                binding.games.add_category(game.id, &category)?;
            }
        }

        for publisher in &entry.publishers {
            let qualifies = self.publishers.contains(publisher)
                || (self.all_publishers && self.frequent(&self.pub_counts, publisher));
            if qualifies {
                let category = binding.games.categories().get_or_create(publisher)?;
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
            .boolean("AllDevelopers", self.all_developers)
            .boolean("AllPublishers", self.all_publishers)
            .list("Developers", &self.developers)
            .list("Publishers", &self.publishers)
            .number("MinCount", self.min_count)
            .finish()
    }
}

impl Clone for AutoCatDevPub {
    fn clone(&self) -> Self {
        AutoCatDevPub {
            core: self.core.clone(),
            all_developers: self.all_developers,
            all_publishers: self.all_publishers,
            developers: self.developers.clone(),
            publishers: self.publishers.clone(),
            min_count: self.min_count,
            // Derived per run, not part of the configuration.
            dev_counts: HashMap::new(),
            pub_counts: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocat::registry::load_autocat_from_element;
    use crate::database::GameDbEntry;

    fn fixture() -> (Arc<GameList>, Arc<GameDb>) {
        let games = GameList::new();
        let mut db = GameDb::new();

        let entries = vec![
            GameDbEntry::new(1, "First")
                .with_developers(&["Prolific Studio"])
                .with_publishers(&["Big Pub"]),
            GameDbEntry::new(2, "Second")
                .with_developers(&["Prolific Studio"])
                .with_publishers(&["Small Pub"]),
            GameDbEntry::new(3, "Third")
                .with_developers(&["One-Hit Dev"])
                .with_publishers(&["Big Pub"]),
        ];
        for entry in entries {
            games.add_game(GameInfo::new(entry.id, &entry.name)).unwrap();
            db.insert(entry);
        }
        (Arc::new(games), Arc::new(db))
    }

    fn run(autocat: &mut AutoCatDevPub, games: &Arc<GameList>, db: &Arc<GameDb>) {
        autocat.pre_process(games.clone(), db.clone()).unwrap();
        for id in games.ids().unwrap() {
            let game = games.game(id).unwrap().unwrap();
            autocat.categorize_game(&game, None).unwrap();
        }
        autocat.de_process();
    }

    #[test]
    fn listed_names_always_qualify() {
        let (games, db) = fixture();
        let mut autocat = AutoCatDevPub::new("devpub").with_developers(&["One-Hit Dev"]);

        run(&mut autocat, &games, &db);

        assert!(games.categories_of(3).unwrap().contains("One-Hit Dev"));
        assert!(games.categories_of(1).unwrap().is_empty());
    }

    #[test]
    fn all_developers_obeys_min_count() {
        let (games, db) = fixture();
        let mut autocat = AutoCatDevPub::new("devpub")
            .with_all_developers(true)
            .with_min_count(2);

        run(&mut autocat, &games, &db);

        // Two games by Prolific Studio, one by One-Hit Dev.
        assert!(games.categories_of(1).unwrap().contains("Prolific Studio"));
        assert!(games.categories_of(2).unwrap().contains("Prolific Studio"));
        assert!(!games.categories_of(3).unwrap().contains("One-Hit Dev"));
    }

    #[test]
    fn min_count_of_one_takes_every_occurrence() {
        let (games, db) = fixture();
        let mut autocat = AutoCatDevPub::new("devpub")
            .with_all_developers(true)
            .with_min_count(1);

        run(&mut autocat, &games, &db);

        assert!(games.categories_of(3).unwrap().contains("One-Hit Dev"));
    }

    #[test]
    fn publishers_count_separately_from_developers() {
        let (games, db) = fixture();
        let mut autocat = AutoCatDevPub::new("devpub")
            .with_all_publishers(true)
            .with_min_count(2);

        run(&mut autocat, &games, &db);

        assert!(games.categories_of(1).unwrap().contains("Big Pub"));
        assert!(games.categories_of(3).unwrap().contains("Big Pub"));
        assert!(!games.categories_of(2).unwrap().contains("Small Pub"));
        // Developers were not requested at all.
        assert!(!games.categories_of(1).unwrap().contains("Prolific Studio"));
    }

    #[test]
    fn counts_are_cleared_on_de_process() {
        let (games, db) = fixture();
        let mut autocat = AutoCatDevPub::new("devpub").with_all_developers(true);
        autocat.pre_process(games, db).unwrap();
        assert!(!autocat.dev_counts.is_empty());

        autocat.de_process();

        assert!(autocat.dev_counts.is_empty());
        assert!(autocat.pub_counts.is_empty());
    }

    #[test]
    fn element_round_trip() {
        let original = AutoCatDevPub::new("devpub")
            .with_all_developers(true)
            .with_publishers(&["Big Pub"])
            .with_min_count(3);

        let element = original.write_to_element();
        let loaded = load_autocat_from_element(&element).unwrap();

        assert_eq!(loaded.kind(), AutoCatKind::DevPub);
        assert_eq!(loaded.write_to_element(), element);
    }
}
