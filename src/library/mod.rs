mod category;
mod filter;
mod game;
mod game_list;

pub use category::{Category, CategoryStore};
pub use filter::Filter;
pub use game::{GameId, GameInfo};
pub use game_list::GameList;
