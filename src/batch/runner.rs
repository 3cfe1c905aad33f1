use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::autocat::{AutoCat, CategorizeResult};
use crate::batch::progress::{BatchEvent, ProgressSink};
use crate::database::GameDb;
use crate::error::AutoCatError;
use crate::library::{Filter, GameId, GameList};

/// Totals from one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    /// Games the filter excluded.
    pub skipped: usize,
    /// Games missing from the reference database; refresh and retry these.
    pub not_in_database: Vec<GameId>,
    /// Game ids the list did not contain. At most one: the run stops there.
    pub failed: Vec<GameId>,
    pub cancelled: bool,
}

impl BatchSummary {
    /// Number of games looked at, whatever the outcome.
    pub fn processed(&self) -> usize {
        self.succeeded + self.skipped + self.not_in_database.len() + self.failed.len()
    }
}

/// Drives one scheme over a set of games: binds it, walks the ids in
/// order, accounts per-game outcomes, and releases the binding on every
/// exit path.
///
/// The kernel never retries anything itself. `NotInDatabase` games are
/// collected for the caller to refresh and re-run; a `Failure` stops the
/// remainder of the batch; the cancellation flag is checked between
/// games.
pub struct BatchRunner {
    sink: Option<Box<dyn ProgressSink>>,
    cancel: Option<Arc<AtomicBool>>,
    filter: Option<Filter>,
}

impl BatchRunner {
    pub fn new() -> Self {
        BatchRunner {
            sink: None,
            cancel: None,
            filter: None,
        }
    }

    pub fn with_sink<S: ProgressSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Run over every game in the list, in id order.
    pub fn run_all(
        &mut self,
        autocat: &mut dyn AutoCat,
        games: Arc<GameList>,
        db: Arc<GameDb>,
    ) -> Result<BatchSummary, AutoCatError> {
        let ids = games.ids()?;
        self.run(autocat, games, db, &ids)
    }

    /// Run over the given ids. `pre_process` happens once up front and
    /// `de_process` once on the way out, error paths included.
    pub fn run(
        &mut self,
        autocat: &mut dyn AutoCat,
        games: Arc<GameList>,
        db: Arc<GameDb>,
        ids: &[GameId],
    ) -> Result<BatchSummary, AutoCatError> {
        autocat.pre_process(games.clone(), db)?;
        let outcome = self.run_bound(autocat, &games, ids);
        autocat.de_process();

        let summary = outcome?;
        self.emit(&BatchEvent::Finished);
        Ok(summary)
    }

    fn run_bound(
        &mut self,
        autocat: &dyn AutoCat,
        games: &GameList,
        ids: &[GameId],
    ) -> Result<BatchSummary, AutoCatError> {
        let mut summary = BatchSummary::default();

        for &id in ids {
            if self.is_cancelled() {
                summary.cancelled = true;
                self.emit(&BatchEvent::Cancelled);
                break;
            }

            let game = match games.game(id)? {
                Some(game) => game,
                None => {
                    summary.failed.push(id);
                    self.emit(&BatchEvent::Game {
                        id,
                        result: CategorizeResult::Failure,
                    });
                    break;
                }
            };

            if let Some(filter) = &self.filter {
                if !filter.matches(&game) {
                    summary.skipped += 1;
                    continue;
                }
            }

            let result = autocat.categorize_game(&game, self.filter.as_ref())?;
            self.emit(&BatchEvent::Game { id, result });

            match result {
                CategorizeResult::Success => summary.succeeded += 1,
                CategorizeResult::NotInDatabase => summary.not_in_database.push(id),
                CategorizeResult::Failure => {
                    summary.failed.push(id);
                    break;
                }
            }
        }

        Ok(summary)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    fn emit(&mut self, event: &BatchEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_event(event);
        }
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
