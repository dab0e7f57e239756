// Load an index with random songs, churn half of it and report on the
// shape of the tree.
//
//   rbt-index [count] [seed]
//
// count defaults to 10_000, seed defaults to the current time.

use std::{
    env,
    error::Error,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use log::{error, info};
use rand::{rngs::SmallRng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use rbt_index::{Field, Playlist, Rbt, Song, Strategy};

const DEFAULT_COUNT: usize = 10_000;

fn main() {
    let level = match env::var("RBT_LOG").as_ref().map(String::as_str) {
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let config = Config::default();
    if let Err(err) = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("logging disabled: {}", err);
    }

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let count: usize = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_COUNT,
    };
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };
    info!("count:{} seed:{}", count, seed);

    let mut rng = SmallRng::seed_from_u64(seed);
    let songs: Vec<Song> = (0..count).map(|_| Song::random(&mut rng)).collect();

    let start = Instant::now();
    let mut index = Rbt::load_from("random-songs", songs.iter().cloned());
    info!("loaded {} songs in {:?}", index.len(), start.elapsed());

    let start = Instant::now();
    for song in songs.iter().step_by(2) {
        index.delete(song.title());
    }
    info!("deleted down to {} songs in {:?}", index.len(), start.elapsed());

    if let Some(song) = songs.last() {
        for &strategy in [Strategy::Iterative, Strategy::BreadthFirst].iter() {
            let start = Instant::now();
            let found = index.search(strategy, Field::Title, song.title())?;
            info!(
                "{} search {:?} found:{} in {:?}",
                strategy,
                song.title(),
                found.is_some(),
                start.elapsed()
            );
        }
    }

    let mut playlist = Playlist::new("random-picks");
    for song in index.sorted_by(Field::Artist, true).into_iter().take(5) {
        playlist.add(song);
    }
    for song in playlist.resolve(&index) {
        info!("{} | {}", playlist, song);
    }

    let stats = index.validate()?;
    info!(
        "entries:{} node_size:{} blacks:{:?} height:{} footprint:{}",
        stats.entries(),
        stats.node_size(),
        stats.blacks(),
        index.height(),
        index.footprint()
    );
    if let Some(depths) = stats.depths() {
        depths.log("  ");
    }
    Ok(())
}
