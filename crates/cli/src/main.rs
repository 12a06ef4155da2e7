//! # CLI - RiptideKV Interactive Shell
//!
//! A REPL-style command-line interface for the RiptideKV storage engine.
//! Reads commands from stdin, executes them against the engine, and prints
//! results to stdout. Designed for both interactive use and scripted testing
//! (pipe commands via stdin).
//!
//! ## Commands
//!
//! ```text
//! SET key value      Insert or update a key-value pair (key is a u64)
//! GET key            Look up a key (prints value or "(nil)")
//! DEL key            Delete a key (writes a tombstone)
//! FLUSH              Force a minor compaction (memtable -> level-0 table)
//! COMPACT            Force a minor and then major compaction
//! STATS              Print level-0/level-1 table counts and memtable size
//! EXIT / QUIT        Shut down gracefully
//! ```
//!
//! ## Configuration
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! RIPTIDE_DIR         Database directory         (default: "data")
//! RIPTIDE_FLUSH_KB    Flush threshold in KiB      (default: 4096 = 4 MiB)
//! RIPTIDE_WAL_SYNC    fsync every WAL append      (default: "false")
//! RIPTIDE_L0_TRIGGER  L0 compaction trigger       (default: 4)
//! RIPTIDE_BLOCK_SIZE  Table index block size      (default: 10)
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! RiptideKV started (dir=data, flush=4096KiB, l0_trigger=4)
//! > SET 1 Alice
//! OK
//! > GET 1
//! Alice
//! > EXIT
//! bye
//! ```
use anyhow::{Context, Result};
use config::Config;
use engine::Engine;
use fs::OsFilesystem;
use std::io::{self, BufRead, Write};

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    let dir = env_or("RIPTIDE_DIR", "data");
    let flush_kb: usize = env_or("RIPTIDE_FLUSH_KB", "4096").parse().unwrap_or(4096);
    let wal_sync: bool = env_or("RIPTIDE_WAL_SYNC", "false").parse().unwrap_or(false);
    let l0_trigger: usize = env_or("RIPTIDE_L0_TRIGGER", "4").parse().unwrap_or(4);
    let block_size: usize = env_or("RIPTIDE_BLOCK_SIZE", "10").parse().unwrap_or(10);

    let config = Config {
        table_block_size: block_size,
        wal_flush_threshold: flush_kb * 1024,
        level0_compaction_trigger: l0_trigger,
        wal_sync,
    };

    let store_fs = OsFilesystem::open(&dir).with_context(|| format!("opening database directory {dir}"))?;
    let mut db = Engine::open(store_fs, config)?;

    println!(
        "RiptideKV started (dir={}, flush={}KiB, l0_trigger={})",
        dir, flush_kb, l0_trigger
    );
    println!("Commands: SET key value | GET key | DEL key | COMPACT | FLUSH | STATS | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if let Some(cmd) = parts.next() {
            match cmd.to_uppercase().as_str() {
                "SET" => match parts.next().map(|k| k.parse::<u64>()) {
                    Some(Ok(key)) => {
                        let value: String = parts.collect::<Vec<&str>>().join(" ");
                        if value.is_empty() {
                            println!("ERR usage: SET key value");
                        } else {
                            match db.put(key, value.into_bytes()) {
                                Ok(()) => println!("OK"),
                                Err(e) => println!("ERR set failed: {}", e),
                            }
                        }
                    }
                    Some(Err(_)) => println!("ERR key must be an unsigned integer"),
                    None => println!("ERR usage: SET key value"),
                },
                "GET" => match parts.next().map(|k| k.parse::<u64>()) {
                    Some(Ok(key)) => match db.get(key) {
                        Ok(Some(v)) => println!("{}", String::from_utf8_lossy(&v)),
                        Ok(None) => println!("(nil)"),
                        Err(e) => println!("ERR read failed: {}", e),
                    },
                    Some(Err(_)) => println!("ERR key must be an unsigned integer"),
                    None => println!("ERR usage: GET key"),
                },
                "DEL" => match parts.next().map(|k| k.parse::<u64>()) {
                    Some(Ok(key)) => match db.delete(key) {
                        Ok(()) => println!("OK"),
                        Err(e) => println!("ERR del failed: {}", e),
                    },
                    Some(Err(_)) => println!("ERR key must be an unsigned integer"),
                    None => println!("ERR usage: DEL key"),
                },
                "COMPACT" => match db.compact() {
                    Ok(()) => println!("OK (L0={})", db.level0_len()),
                    Err(e) => println!("ERR compact failed: {}", e),
                },
                "FLUSH" => match db.flush() {
                    Ok(()) => println!("OK (L0={})", db.level0_len()),
                    Err(e) => println!("ERR flush failed: {}", e),
                },
                "STATS" => {
                    println!(
                        "memtable_bytes={} level0_tables={}",
                        db.memtable_size_estimate(),
                        db.level0_len()
                    );
                }
                "EXIT" | "QUIT" => {
                    println!("bye");
                    break;
                }
                other => {
                    println!("unknown command: {}", other);
                }
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    db.close()?;
    Ok(())
}
