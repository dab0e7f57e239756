use crate::error::Error;
use crate::rbt::Rbt;
use crate::search::Strategy;
use crate::song::{Field, Song};

const STRATEGIES: [Strategy; 4] = [
    Strategy::Iterative,
    Strategy::Recursive,
    Strategy::BreadthFirst,
    Strategy::DepthFirst,
];

fn make_index() -> Rbt {
    let songs = vec![
        Song::new("Hey Jude", "The Beatles", "Hey Jude", "Rock"),
        Song::new("Bohemian Rhapsody", "Queen", "A Night at the Opera", "Rock"),
        Song::new("So What", "Miles Davis", "Kind of Blue", "Jazz"),
        Song::new("Imagine", "John Lennon", "Imagine", "Pop"),
        Song::new("Clair de Lune", "Debussy", "Suite bergamasque", "Classical"),
        Song::new("Smells Like Teen Spirit", "Nirvana", "Nevermind", "Grunge"),
        Song::new("Take Five", "Dave Brubeck", "Time Out", "Jazz"),
    ];
    Rbt::load_from("test-search", songs)
}

#[test]
fn test_search_title() {
    let index = make_index();
    for strategy in STRATEGIES.iter() {
        for title in ["Hey Jude", "Clair de Lune", "Take Five", "Imagine"].iter() {
            let song = index.search(*strategy, Field::Title, title).unwrap();
            assert_eq!(song.map(Song::title), Some(*title), "{}", strategy);
        }
        let song = index.search(*strategy, Field::Title, "Yesterday").unwrap();
        assert!(song.is_none(), "{}", strategy);
    }
}

#[test]
fn test_search_empty() {
    let index = Rbt::new("test-search");
    for strategy in STRATEGIES.iter() {
        let song = index.search(*strategy, Field::Title, "Hey Jude");
        assert_eq!(song, Ok(None), "{}", strategy);
    }
    assert!(index.search_bfs(Field::Genre, "Rock").is_none());
    assert!(index.search_dfs(Field::Genre, "Rock").is_none());
}

#[test]
fn test_search_invalid_selector() {
    let index = make_index();
    for field in [Field::Artist, Field::Album, Field::Genre].iter() {
        let err = Err(Error::InvalidSelector(*field));
        assert_eq!(index.search(Strategy::Iterative, *field, "Queen"), err);
        assert_eq!(index.search_recursive(*field, "Queen"), err);
    }
}

#[test]
fn test_search_non_key() {
    let index = make_index();

    // Grunge is carried by a single, non-root, entry.
    let root = index.root().map(Song::title);
    assert_ne!(root, Some("Smells Like Teen Spirit"));
    let bfs = index.search(Strategy::BreadthFirst, Field::Genre, "Grunge").unwrap();
    let dfs = index.search(Strategy::DepthFirst, Field::Genre, "Grunge").unwrap();
    assert_eq!(bfs.map(Song::title), Some("Smells Like Teen Spirit"));
    assert_eq!(bfs, dfs);

    let song = index.search_bfs(Field::Artist, "Miles Davis");
    assert_eq!(song.map(Song::title), Some("So What"));
    let song = index.search_dfs(Field::Album, "Time Out");
    assert_eq!(song.map(Song::title), Some("Take Five"));
    assert!(index.search_bfs(Field::Artist, "Queen ").is_none());
    assert!(index.search_dfs(Field::Artist, "queen").is_none());
}

#[test]
fn test_search_order() {
    let index = make_index();

    // breadth-first returns the shallowest match, depth-first the
    // first match in pre-order.
    let root = index.root().unwrap();
    let song = index.search_bfs(Field::Genre, root.genre()).unwrap();
    assert_eq!(song.title(), root.title());

    let jazz: Vec<&str> = index
        .iter()
        .filter(|s| s.genre() == "Jazz")
        .map(Song::title)
        .collect();
    assert_eq!(jazz, vec!["So What", "Take Five"]);
    for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst].iter() {
        let song = index.search(*strategy, Field::Genre, "Jazz").unwrap().unwrap();
        assert!(jazz.contains(&song.title()));
    }
}

#[test]
fn test_search_after_delete() {
    let mut index = make_index();
    assert!(index.delete("Imagine").is_some());
    for strategy in STRATEGIES.iter() {
        let song = index.search(*strategy, Field::Title, "Imagine").unwrap();
        assert!(song.is_none(), "{}", strategy);
    }
    assert!(index.search_bfs(Field::Genre, "Pop").is_none());

    index.insert(Song::new("Imagine", "John Lennon", "Imagine", "Pop"));
    index.insert(Song::new("Imagine", "A Perfect Circle", "eMOTIVe", "Rock"));
    assert!(index.delete("Imagine").is_some());
    for strategy in STRATEGIES.iter() {
        let song = index.search(*strategy, Field::Title, "Imagine").unwrap();
        assert_eq!(song.map(Song::title), Some("Imagine"), "{}", strategy);
    }
}

#[test]
fn test_strategy() {
    assert!(Strategy::Iterative.is_ordered());
    assert!(Strategy::Recursive.is_ordered());
    assert!(!Strategy::BreadthFirst.is_ordered());
    assert!(!Strategy::DepthFirst.is_ordered());
    assert_eq!(Strategy::BreadthFirst.to_string(), "breadth-first");
}
