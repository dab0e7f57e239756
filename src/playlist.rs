use std::fmt;

use log::debug;

use crate::rbt::Rbt;
use crate::song::Song;

/// Playlist is a named, ordered list of song titles. It holds titles
/// only and is resolved against an [`Rbt`] index when the songs are
/// needed, so deleting a song from the index drops it from every
/// playlist on the next resolve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Playlist {
    name: String,
    titles: Vec<String>,
}

impl Playlist {
    /// Create an empty playlist identified by `name`.
    pub fn new<S>(name: S) -> Playlist
    where
        S: AsRef<str>,
    {
        Playlist {
            name: name.as_ref().to_string(),
            titles: vec![],
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Titles in play order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Append `song` to the end of the playlist. A song may appear more
    /// than once.
    pub fn add(&mut self, song: &Song) {
        self.titles.push(song.title().to_string())
    }

    /// Remove every occurrence of `title`, returning how many were
    /// removed.
    pub fn remove(&mut self, title: &str) -> usize {
        let n = self.titles.len();
        self.titles.retain(|t| t != title);
        n - self.titles.len()
    }

    /// Look up each title in `index`, in play order. Titles no longer
    /// present in the index are skipped.
    pub fn resolve<'a>(&self, index: &'a Rbt) -> Vec<&'a Song> {
        let mut songs = Vec::with_capacity(self.titles.len());
        for title in self.titles.iter() {
            match index.get(title) {
                Some(song) => songs.push(song),
                None => debug!("{}: {:?} missing from {}", self.name, title, index.id()),
            }
        }
        songs
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "playlist: {}, songs: {}", self.name, self.titles.len())
    }
}
