use std::cmp::Ordering;

use rand::{rngs::SmallRng, SeedableRng};

use crate::error::Error;
use crate::song::{Field, Song};

#[test]
fn test_song_order() {
    let a = Song::new("Alpha", "z-artist", "z-album", "z-genre");
    let b = Song::new("Beta", "a-artist", "a-album", "a-genre");
    assert_eq!(a.cmp(&b), Ordering::Less);
    assert!(b > a);

    // equality is on title only.
    let c = Song::new("Alpha", "other", "other", "other");
    assert_eq!(a, c);
    assert_eq!(a.cmp(&c), Ordering::Equal);
}

#[test]
fn test_song_fields() {
    let song = Song::new("Hey Jude", "The Beatles", "Hey Jude", "Rock");
    assert_eq!(song.field(Field::Title), "Hey Jude");
    assert_eq!(song.field(Field::Artist), "The Beatles");
    assert_eq!(song.field(Field::Album), "Hey Jude");
    assert_eq!(song.field(Field::Genre), "Rock");
    assert_eq!(
        song.to_string(),
        "Hey Jude by The Beatles - album: Hey Jude, genre: Rock"
    );
}

#[test]
fn test_field() {
    assert_eq!(Field::KEY, Field::Title);
    assert!(Field::Title.is_key());
    assert!(!Field::Genre.is_key());

    for field in [Field::Title, Field::Artist, Field::Album, Field::Genre].iter() {
        let parsed: Field = field.to_string().parse().unwrap();
        assert_eq!(parsed, *field);
    }
    assert_eq!("GENRE".parse::<Field>(), Ok(Field::Genre));
    let err = Error::UnknownField("year".to_string());
    assert_eq!("year".parse::<Field>(), Err(err));
}

#[test]
fn test_random_song() {
    let mut rng = SmallRng::from_seed([7; 16]);
    for _ in 0..1000 {
        let song = Song::random(&mut rng);
        for field in [Field::Title, Field::Artist, Field::Album, Field::Genre].iter() {
            let value = song.field(*field);
            assert!(value.len() >= 5 && value.len() <= 10, "{:?}", value);
            assert!(value.chars().all(|c| c.is_ascii_uppercase()), "{:?}", value);
        }
    }
}
