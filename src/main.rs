//! Command-line driver for the storage core: a line-oriented REPL that
//! reads `CREATE TABLE`, `INSERT INTO`, and `JOIN` statements from stdin
//! (or a `--script` file) and dispatches them to the catalog, heap, and
//! join crates.

use std::env;
use std::path::PathBuf;

use tokio::io::{self, AsyncBufReadExt};

use trdb::config::EngineConfig;
use trdb::engine_environment::{init_logging, EngineEnvironment};
use trdb::repl::Engine;

#[tokio::main]
async fn main() {
    let mut config_path = PathBuf::from("trdb.toml");
    let mut script_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = require_path_arg(&mut args, "--config"),
            "--script" => script_path = Some(require_path_arg(&mut args, "--script")),
            other => {
                eprintln!("unrecognized argument `{other}`");
                std::process::exit(2);
            }
        }
    }

    let config = match EngineConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let _logging_guard = match init_logging(&config.storage.logs_dir) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("failed to initialize logging: {err}");
            std::process::exit(2);
        }
    };

    let mut env = EngineEnvironment::new(config);

    match script_path {
        Some(path) => run_script(&mut env.engine, &path).await,
        None => run_stdin(&mut env.engine).await,
    }
}

fn require_path_arg(args: &mut impl Iterator<Item = String>, flag: &str) -> PathBuf {
    match args.next() {
        Some(value) => PathBuf::from(value),
        None => {
            eprintln!("{flag} requires a path argument");
            std::process::exit(2);
        }
    }
}

async fn run_script(engine: &mut Engine, path: &std::path::Path) {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("failed to read script {}: {err}", path.display());
            std::process::exit(2);
        }
    };

    for line in contents.lines() {
        run_line(engine, line);
    }
}

async fn run_stdin(engine: &mut Engine) {
    let stdin = io::BufReader::new(io::stdin());
    let mut lines = stdin.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::error!(%err, "error reading from stdin");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        run_line(engine, &line);
    }
}

fn run_line(engine: &mut Engine, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    match engine.execute(line) {
        Ok(message) if message.is_empty() => {}
        Ok(message) => println!("{message}"),
        Err(err) => {
            tracing::warn!(%err, statement = line, "statement failed");
            eprintln!("error: {err}");
        }
    }
}
