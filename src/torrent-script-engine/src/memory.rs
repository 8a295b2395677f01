use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, ensure};
use spin::Mutex;
use tracing::{instrument, trace};

use crate::{
    InfoHash, PeerInfo, TorrentHandle, TorrentInfo, TorrentState, TorrentStatus, TransferState,
};

/// A handle into the in-memory engine.
///
/// All clones of a `MemoryHandle` refer to the same torrent entry, the way a
/// real engine handle refers to a slot in the engine's torrent table. The
/// engine keeps a count of the handles that are alive for each entry, which is
/// how callers can observe when a copy has been released.
pub struct MemoryHandle {
    entry: Arc<Entry>,
}

struct Entry {
    state: Mutex<TorrentState>,
    live: AtomicUsize,
}

impl MemoryHandle {
    /// Add a torrent to the engine and return the first handle to it.
    pub fn new(state: TorrentState) -> Self {
        let entry = Arc::new(Entry {
            state: Mutex::new(state),
            live: AtomicUsize::new(1),
        });
        Self { entry }
    }

    /// The number of handles to this torrent that have not been dropped yet.
    pub fn live_handles(&self) -> usize {
        self.entry.live.load(Ordering::SeqCst)
    }

    /// A copy of the current torrent state.
    pub fn snapshot(&self) -> TorrentState {
        self.entry.state.lock().clone()
    }

    /// Change the torrent state, as the engine would while the torrent runs.
    ///
    /// The closure works on a copy that is stored back afterwards, so it may
    /// call into any handle of the same torrent.
    pub fn update(&self, f: impl FnOnce(&mut TorrentState)) {
        let mut state = self.snapshot();
        f(&mut state);
        *self.entry.state.lock() = state;
    }
}

impl Clone for MemoryHandle {
    fn clone(&self) -> Self {
        self.entry.live.fetch_add(1, Ordering::SeqCst);
        Self {
            entry: self.entry.clone(),
        }
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        let previous = self.entry.live.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "torrent handle released more than once");
    }
}

impl TorrentHandle for MemoryHandle {
    fn info_hash(&self) -> InfoHash {
        self.entry.state.lock().info_hash
    }

    fn peers(&self) -> Vec<PeerInfo> {
        self.entry.state.lock().peers.clone()
    }

    fn status(&self) -> TorrentStatus {
        self.entry.state.lock().status.clone()
    }

    fn torrent_file(&self) -> Option<TorrentInfo> {
        self.entry.state.lock().metadata.clone()
    }

    fn file_progress(&self) -> Vec<i64> {
        self.entry.state.lock().file_progress.clone()
    }

    #[instrument(skip(self), level = "debug")]
    fn move_storage(&self, path: &str) -> anyhow::Result<()> {
        if path.is_empty() {
            bail!("Invalid storage path: path is empty");
        }
        ensure!(
            Path::new(path).is_absolute(),
            "Invalid storage path {path:?}: path must be absolute"
        );
        self.entry.state.lock().status.save_path = path.to_string();
        Ok(())
    }

    fn pause(&self) {
        let mut state = self.entry.state.lock();
        trace!(info_hash = %state.info_hash, "pausing torrent");
        state.status.is_paused = true;
        state.status.state = TransferState::Paused;
    }

    fn resume(&self) {
        let mut state = self.entry.state.lock();
        trace!(info_hash = %state.info_hash, "resuming torrent");
        state.status.is_paused = false;
        state.status.state = if state.status.progress >= 1.0 {
            TransferState::Seeding
        } else {
            TransferState::Downloading
        };
    }

    fn queue_position(&self) -> i32 {
        self.entry.state.lock().queue_position
    }

    fn tags(&self) -> Vec<String> {
        self.entry.state.lock().tags.clone()
    }

    fn clone_handle(&self) -> Box<dyn TorrentHandle> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> MemoryHandle {
        MemoryHandle::new(TorrentState {
            queue_position: 3,
            tags: vec!["tag1".to_string()],
            ..Default::default()
        })
    }

    #[test]
    fn clones_share_state() {
        let a = handle();
        let b = a.clone_handle();
        a.update(|s| s.queue_position = 7);
        assert_eq!(b.queue_position(), 7);
    }

    #[test]
    fn update_may_read_through_the_handle() {
        let a = handle();
        a.update(|s| {
            s.tags = a.tags();
            s.tags.push("tag2".to_string());
        });
        assert_eq!(a.tags(), ["tag1", "tag2"]);
    }

    #[test]
    fn counts_live_handles() {
        let a = handle();
        assert_eq!(a.live_handles(), 1);
        let b = a.clone_handle();
        let c = a.clone();
        assert_eq!(a.live_handles(), 3);
        drop(b);
        drop(c);
        assert_eq!(a.live_handles(), 1);
    }

    #[test]
    fn move_storage_requires_absolute_path() {
        let a = handle();
        assert!(a.move_storage("").is_err());
        assert!(a.move_storage("relative/dir").is_err());
        assert_eq!(a.status().save_path, "");

        let target = if cfg!(windows) { "C:\\data" } else { "/data" };
        a.move_storage(target).unwrap();
        assert_eq!(a.status().save_path, target);
    }

    #[test]
    fn pause_and_resume_toggle_state() {
        let a = handle();
        a.pause();
        assert!(a.status().is_paused);
        assert_eq!(a.status().state, TransferState::Paused);
        a.resume();
        assert!(!a.status().is_paused);
        assert_eq!(a.status().state, TransferState::Downloading);
    }

    #[test]
    fn state_deserializes_from_camel_case_json() {
        let state: TorrentState = serde_json::from_str(
            r#"{
                "infoHash": "00112233445566778899aabbccddeeff00112233",
                "queuePosition": 2,
                "tags": ["movies"],
                "peers": [{ "endpoint": "10.0.0.1:6881", "client": "qB" }],
                "status": { "name": "ubuntu.iso", "state": "seeding" }
            }"#,
        )
        .unwrap();
        assert_eq!(state.queue_position, 2);
        assert_eq!(state.peers[0].endpoint.port(), 6881);
        assert_eq!(state.status.state, TransferState::Seeding);
        assert!(state.metadata.is_none());
    }
}
