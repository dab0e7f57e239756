use std::{
    cmp::{Ord, Ordering},
    fmt,
    str::FromStr,
};

use rand::Rng;

use crate::error::Error;

/// Song is the record type indexed by [`Rbt`]. Entries are ordered and
/// compared on title alone, remaining fields are carried as payload.
///
/// Fields are read-only once constructed. To change the title of an
/// indexed song, delete it and insert the updated copy.
///
/// [`Rbt`]: crate::Rbt
#[derive(Clone, Debug, Default)]
pub struct Song {
    title: String,
    artist: String,
    album: String,
    genre: String,
}

impl Song {
    /// Create a new song record.
    pub fn new<S>(title: S, artist: S, album: S, genre: S) -> Song
    where
        S: Into<String>,
    {
        Song {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
        }
    }

    /// Generate a song with random upper-case fields, each 5 to 10
    /// characters long. Useful for loading test data.
    pub fn random<R: Rng>(rng: &mut R) -> Song {
        Song {
            title: random_word(rng),
            artist: random_word(rng),
            album: random_word(rng),
            genre: random_word(rng),
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[inline]
    pub fn album(&self) -> &str {
        &self.album
    }

    #[inline]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Return the value of the selected field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Album => &self.album,
            Field::Genre => &self.genre,
        }
    }

    // heap bytes held by this record's strings.
    pub(crate) fn heap_size(&self) -> usize {
        self.title.capacity()
            + self.artist.capacity()
            + self.album.capacity()
            + self.genre.capacity()
    }
}

fn random_word<R: Rng>(rng: &mut R) -> String {
    let n = rng.gen_range(5, 11);
    (0..n).map(|_| char::from(rng.gen_range(b'A', b'Z' + 1))).collect()
}

impl PartialEq for Song {
    fn eq(&self, other: &Song) -> bool {
        self.title == other.title
    }
}

impl Eq for Song {}

impl PartialOrd for Song {
    fn partial_cmp(&self, other: &Song) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Song {
    fn cmp(&self, other: &Song) -> Ordering {
        self.title.cmp(&other.title)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} by {} - album: {}, genre: {}",
            self.title, self.artist, self.album, self.genre
        )
    }
}

/// Field selects one attribute of [`Song`] for searching.
///
/// Trees are keyed on [`Field::KEY`]. Ordered searches accept only the
/// key field, breadth-first and depth-first searches accept any field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Genre,
}

impl Field {
    /// Field on which [`Song`] entries are ordered.
    pub const KEY: Field = Field::Title;

    /// Return whether ordered descent is valid for this field.
    #[inline]
    pub fn is_key(self) -> bool {
        self == Field::KEY
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Genre => "genre",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Field, Error> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "artist" => Ok(Field::Artist),
            "album" => Ok(Field::Album),
            "genre" => Ok(Field::Genre),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}
