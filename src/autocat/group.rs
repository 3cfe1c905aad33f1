use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::autocat::autocat::AutoCat;
use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::error::AutoCatError;
use crate::library::{Filter, GameId, GameInfo};
use crate::persist::{ChildWriter, ElementReader, ElementWriter};

/// A named, hand-curated list of game ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameGroup {
    pub name: String,
    pub games: Vec<GameId>,
}

impl GameGroup {
    pub fn new(name: &str, games: &[GameId]) -> Self {
        GameGroup {
            name: name.to_string(),
            games: games.to_vec(),
        }
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games.contains(&id)
    }
}

/// Assigns `prefix + group name` for every curated group containing the
/// game. A game can sit in any number of groups.
#[derive(Clone)]
pub struct AutoCatGroup {
    core: AutoCatCore,
    pub prefix: String,
    pub groups: Vec<GameGroup>,
}

impl AutoCatGroup {
    pub const TYPE_ID: &'static str = "AutoCatGroup";

    pub fn new(name: &str) -> Self {
        AutoCatGroup {
            core: AutoCatCore::new(name),
            prefix: String::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_groups(mut self, groups: Vec<GameGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn add_group(&mut self, group: GameGroup) {
        self.groups.push(group);
    }

    pub(crate) fn load_from_element(reader: &ElementReader<'_>) -> Self {
        let mut autocat = AutoCatGroup::new(&reader.text("Name", ""));
        autocat
            .core
            .set_filter(reader.opt_text("Filter").as_deref());
        autocat.prefix = reader.text("Prefix", "");
        autocat.groups = reader
            .children("Group")
            .iter()
            .map(|group| GameGroup {
                name: group.text("Text", ""),
                games: group
                    .list("Games")
                    .iter()
                    .filter_map(|id| id.parse().ok())
                    .collect(),
            })
            .collect();
        autocat
    }
}

impl AutoCat for AutoCatGroup {
    fn core(&self) -> &AutoCatCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutoCatCore {
        &mut self.core
    }

    fn kind(&self) -> AutoCatKind {
        AutoCatKind::Group
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

        for group in self.groups.iter().filter(|group| group.contains(game.id)) {
            let category = binding
                .games
                .categories()
                .get_or_create(&format!("{}{}", self.prefix, group.name))?;
            binding.games.add_category(game.id, &category)?;
        }

        Ok(CategorizeResult::Success)
    }

    fn clone_boxed(&self) -> Box<dyn AutoCat> {
        Box::new(self.clone())
    }

    fn write_to_element(&self) -> Value {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                let ids: Vec<String> = group.games.iter().map(|id| id.to_string()).collect();
                ChildWriter::new()
                    .text("Text", &group.name)
                    .list("Games", &ids)
                    .finish()
            })
            .collect();

        ElementWriter::new(Self::TYPE_ID)
            .text("Name", self.core.name())
            .opt_text("Filter", self.core.filter())
            .text("Prefix", &self.prefix)
            .children("Group", groups)
            .finish()
    }
}
