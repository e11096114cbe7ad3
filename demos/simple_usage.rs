/// Example: matching a User-Agent against a compiled signature database.
///
/// Run with the path to a data file and, optionally, a User-Agent string:
///
///     cargo run --example simple_usage -- /path/to/data.dvdb "Mozilla/5.0 ..."
use std::collections::HashMap;
use std::env;

use devicedb::config::Config;
use devicedb::io::Source;
use devicedb::provider::Provider;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: simple_usage <data-file> [user-agent]")?;
    let user_agent = args.next().unwrap_or_else(|| "Mozilla/5.0 (Linux; Android 13) AppleWebKit/537.36".to_string());

    let provider = Provider::open(Source::from_path(&path), Config::default())?;

    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), user_agent.clone());

    let result = provider.match_headers(&headers)?;
    println!("matched {user_agent:?} via {:?} ({} node(s) evaluated)", result.strategy, result.nodes_evaluated);
    println!("device id: {}", result.device_id()?);

    if let Some(values) = result.values("IsMobile")? {
        println!("IsMobile: {values:?}");
    }

    let stats = provider.result_cache_stats();
    println!("result cache: {} requests, {} misses", stats.requests, stats.misses);

    Ok(())
}
