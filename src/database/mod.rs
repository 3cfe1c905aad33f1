mod app_list;
mod entry;
mod game_db;

#[cfg(feature = "fetch")]
pub use app_list::{fetch_app_list, FetchError};
pub use app_list::{parse_app_list, AppListEntry, APP_LIST_URL};
pub use entry::GameDbEntry;
pub use game_db::{DbError, GameDb};
