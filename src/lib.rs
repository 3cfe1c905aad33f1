mod autocat;
mod batch;
mod database;
mod error;
mod library;
mod persist;

pub use autocat::{
    compare_autocats, create, load_autocat_from_element, sort_autocats, steam_labels_preset,
    wilson_lower_bound, AutoCat, AutoCatCore, AutoCatDevPub, AutoCatFlags, AutoCatGenre,
    AutoCatGroup, AutoCatHltb, AutoCatKind, AutoCatManual, AutoCatName, AutoCatTags,
    AutoCatUserScore, AutoCatYear, Binding, CategorizeResult, GameGroup, HltbRule, UserScoreRule,
};
#[cfg(feature = "emitter")]
pub use batch::EmitterSink;
pub use batch::{BatchEvent, BatchRunner, BatchSummary, LogSink, ProgressSink};
#[cfg(feature = "fetch")]
pub use database::{fetch_app_list, FetchError};
pub use database::{parse_app_list, AppListEntry, DbError, GameDb, GameDbEntry, APP_LIST_URL};
pub use error::{AutoCatError, StoreError};
pub use library::{Category, CategoryStore, Filter, GameId, GameInfo, GameList};
pub use persist::{
    load_autocats, save_autocats, ChildWriter, ElementReader, ElementWriter, LoadedAutoCats,
    PersistError,
};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
