use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::autocat::core::AutoCatCore;
use crate::autocat::registry::AutoCatKind;
use crate::autocat::result::CategorizeResult;
use crate::database::GameDb;
use crate::error::AutoCatError;
use crate::library::{Filter, GameId, GameInfo, GameList};

/// One categorization scheme: a named, configured strategy that assigns
/// categories to a game based on its reference-database entry.
///
/// Lifecycle: `pre_process` binds the stores (and may run one-time batch
/// analysis), `categorize_game` runs per game, `de_process` releases the
/// binding. Categorizing outside that window is a contract violation and
/// comes back as `AutoCatError::NotBound`.
pub trait AutoCat: Send {
    fn core(&self) -> &AutoCatCore;
    fn core_mut(&mut self) -> &mut AutoCatCore;

    fn kind(&self) -> AutoCatKind;

    /// Assign categories for one game snapshot. Filtering games in or
    /// out is the batch driver's job; implementations ignore `filter`.
    fn categorize_game(
        &self,
        game: &GameInfo,
        filter: Option<&Filter>,
    ) -> Result<CategorizeResult, AutoCatError>;

    /// Deep copy of the configuration, without the runtime binding.
    fn clone_boxed(&self) -> Box<dyn AutoCat>;

    /// Persisted element for this scheme: a single-key object whose key
    /// is the scheme's type id.
    fn write_to_element(&self) -> Value;

    fn name(&self) -> &str {
        self.core().name()
    }

    fn set_name(&mut self, name: &str) {
        self.core_mut().set_name(name);
    }

    fn filter(&self) -> Option<&str> {
        self.core().filter()
    }

    fn set_filter(&mut self, filter: Option<&str>) {
        self.core_mut().set_filter(filter);
    }

    /// The name, suffixed `*` when a filter is set.
    fn display_name(&self) -> String {
        self.core().display_name()
    }

    /// Bind the stores for a categorization run. Overrides that need
    /// whole-database analysis do it here, then bind.
    fn pre_process(&mut self, games: Arc<GameList>, db: Arc<GameDb>) -> Result<(), AutoCatError> {
        self.core_mut().bind(games, db);
        Ok(())
    }

    /// Release the binding and any per-run derived state.
    fn de_process(&mut self) {
        self.core_mut().unbind();
    }

    /// Look the game up in the bound list and categorize it. `Failure`
    /// when the id is not in the list.
    fn categorize_game_id(
        &self,
        id: GameId,
        filter: Option<&Filter>,
    ) -> Result<CategorizeResult, AutoCatError> {
        let binding = self.core().binding()?;
        let game = binding.games.game(id)?;
        match game {
            Some(game) => self.categorize_game(&game, filter),
            None => Ok(CategorizeResult::Failure),
        }
    }
}

impl Clone for Box<dyn AutoCat> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl fmt::Display for dyn AutoCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordinal name comparison, the order scheme lists are kept in.
pub fn compare_autocats(a: &dyn AutoCat, b: &dyn AutoCat) -> Ordering {
    a.name().cmp(b.name())
}

/// Sort schemes by name.
pub fn sort_autocats(autocats: &mut [Box<dyn AutoCat>]) {
    autocats.sort_by(|a, b| compare_autocats(a.as_ref(), b.as_ref()));
}
