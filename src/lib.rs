mod depth;
mod error;
mod playlist;
mod rbt;
mod search;
mod song;

pub use crate::depth::Depth;
pub use crate::error::{Error, Result};
pub use crate::playlist::Playlist;
pub use crate::rbt::{Iter, Range, Rbt, Stats};
pub use crate::search::Strategy;
pub use crate::song::{Field, Song};

#[cfg(test)]
mod search_test;
#[cfg(test)]
mod song_test;
