//! The torrent engine interface consumed by the scripting layer.
//!
//! The scripting layer never talks to a concrete engine. Everything it needs
//! goes through the [`TorrentHandle`] trait, and every value it gets back is one
//! of the plain records defined here.
#![deny(dead_code, missing_docs, unused_mut)]
#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::panic))]
#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::expect_used))]
#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::unwrap_used))]

mod handle;
mod info_hash;
/// An engine that keeps its torrent table in memory.
pub mod memory;
mod model;

/// The capability the scripting layer needs from a torrent handle.
pub use handle::TorrentHandle;
/// The identity of a torrent.
pub use info_hash::InfoHash;
/// A handle into the in-memory engine.
pub use memory::MemoryHandle;
/// Records returned by the engine.
pub use model::{
    FileEntry, PeerInfo, TorrentInfo, TorrentState, TorrentStatus, TransferState,
};
