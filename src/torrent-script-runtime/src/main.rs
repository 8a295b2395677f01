use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context as _, Result};
use clap::Parser;
use torrent_script_engine::{MemoryHandle, TorrentState};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

struct Host;

impl torrent_script_runtime::host::Host for Host {
    fn resolve_module(&self, base: String, name: String) -> Result<String> {
        let base = PathBuf::from(base);
        let path = base.join(&name);

        let path = path
            .canonicalize()
            .with_context(|| format!("Resolving module {name:?} from {base:?}"))?;
        Ok(path.display().to_string())
    }

    fn load_module(&self, name: String) -> Result<String> {
        fs::read_to_string(&name).with_context(|| format!("Loading module {name:?}"))
    }
}

const EXAMPLES: &str = "\u{001b}[1;4mExamples:\u{001b}[0m
  Run a handler script located at ./handler.js against the torrent described in ./torrent.json:
    $ cat ./handler.js
    function handler(torrent) {
        torrent.pause();
        return { hash: torrent.infoHash, peers: torrent.getPeers().length };
    }

    $ cat ./torrent.json
    {
        \"infoHash\": \"00112233445566778899aabbccddeeff00112233\",
        \"peers\": [{ \"endpoint\": \"10.0.0.1:6881\" }]
    }

    $ torrent-script-runtime ./handler.js ./torrent.json
    Handler result: {\"hash\":\"00112233445566778899aabbccddeeff00112233\",\"peers\":1}

  Log the lifetime of native handle copies:
    $ RUST_LOG=torrent_script_runtime=trace torrent-script-runtime ./handler.js ./torrent.json
";

/// Run a JavaScript handler script against a torrent held by an in-memory engine.
///
/// The handler script is expected to export a function named `handler` that takes a single argument
/// (the torrent handle) and returns a value.
#[derive(clap::Parser)]
#[command(version, about)]
#[clap(after_help = EXAMPLES)]
struct Cli {
    /// The path to the JavaScript handler script file.
    file: PathBuf,

    /// The path to a JSON file describing the torrent.
    torrent: PathBuf,

    /// Run a garbage collection cycle after the handler returns.
    #[arg(long)]
    gc: bool,
}

#[instrument(skip_all, level = "info")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { file, torrent, gc } = Cli::parse();

    let state = fs::read_to_string(&torrent)
        .with_context(|| format!("Reading torrent description from {torrent:?}"))?;
    let state: TorrentState = serde_json::from_str(&state)
        .with_context(|| format!("Parsing torrent description from {torrent:?}"))?;
    let handle = MemoryHandle::new(state);

    let handler_script = fs::read_to_string(&file)
        .with_context(|| format!("Reading handler script from {file:?}"))?;

    let handler_pwd = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    env::set_current_dir(handler_pwd).with_context(|| {
        format!("Setting current directory to handler script directory {handler_pwd:?}")
    })?;

    let mut runtime = torrent_script_runtime::ScriptRuntime::new(Host)?;

    runtime.register_handler("handler", handler_script, ".")?;

    let result = runtime.run_torrent_handler("handler", &handle, gc)?;
    println!("Handler result: {result}");

    Ok(())
}
