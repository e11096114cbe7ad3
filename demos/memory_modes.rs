/// Example: comparing streaming mode against fully-in-memory mode.
///
/// `memory_mode: false` (the default) reads records through a pooled file
/// reader on demand; `memory_mode: true` maps or loads the whole data file
/// up front, trading memory for avoiding per-lookup I/O.
///
///     cargo run --example memory_modes -- /path/to/data.dvdb
use std::env;

use devicedb::config::Config;
use devicedb::io::Source;
use devicedb::provider::Provider;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args().nth(1).ok_or("usage: memory_modes <data-file>")?;

    let streaming = Provider::open(
        Source::from_path(&path),
        Config { memory_mode: false, ..Config::default() },
    )?;
    let in_memory = Provider::open(
        Source::from_path(&path),
        Config { memory_mode: true, ..Config::default() },
    )?;

    let samples = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        "Mozilla/5.0 (Linux; Android 14)",
    ];

    for ua in samples {
        let a = streaming.match_user_agent(ua.as_bytes())?;
        let b = in_memory.match_user_agent(ua.as_bytes())?;
        println!("{ua:?}: streaming={:?} in_memory={:?}", a.strategy, b.strategy);
    }

    println!("streaming pool: {:?}", streaming.pool_stats());
    println!("in-memory pool: {:?}", in_memory.pool_stats());

    Ok(())
}
