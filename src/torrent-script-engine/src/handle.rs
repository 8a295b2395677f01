use crate::{InfoHash, PeerInfo, TorrentInfo, TorrentStatus};

/// A lightweight reference into the engine's torrent table.
///
/// A handle does not hold torrent data itself. Every call is answered by the
/// engine at the time of the call, so two handles to the same torrent always
/// observe the same state.
///
/// All methods are synchronous and are expected to return promptly.
pub trait TorrentHandle {
    /// The identity of the torrent this handle refers to.
    fn info_hash(&self) -> InfoHash;

    /// The peers currently connected for this torrent, in engine order.
    fn peers(&self) -> Vec<PeerInfo>;

    /// A snapshot of the torrent's transfer status.
    fn status(&self) -> TorrentStatus;

    /// The torrent metadata, or `None` while it is not known yet
    /// (e.g. a magnet link that is still resolving).
    fn torrent_file(&self) -> Option<TorrentInfo>;

    /// Bytes downloaded per file, in the order of the metadata's file list.
    fn file_progress(&self) -> Vec<i64>;

    /// Relocate the torrent's storage to `path`.
    fn move_storage(&self, path: &str) -> anyhow::Result<()>;

    /// Stop transferring data for this torrent.
    fn pause(&self);

    /// Start transferring data for this torrent again.
    fn resume(&self);

    /// The position of the torrent in the download queue.
    fn queue_position(&self) -> i32;

    /// The user assigned tags, in engine order.
    fn tags(&self) -> Vec<String>;

    /// Produce an independent copy of this handle.
    ///
    /// The copy refers to the same torrent but has its own lifetime: dropping it
    /// does not affect `self`, and dropping `self` does not affect it.
    fn clone_handle(&self) -> Box<dyn TorrentHandle>;
}
