mod artist;
mod catalog;
mod load;
mod song;

pub use artist::{Artist, Tag};
pub use catalog::Catalog;
pub use load::load_catalog;
pub use song::{search_link, Song, SongTemplate};
