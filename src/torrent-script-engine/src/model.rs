use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::InfoHash;

/// A peer connected for a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerInfo {
    /// Remote address of the peer.
    pub endpoint: SocketAddr,
    /// Client name as reported in the handshake.
    #[serde(default)]
    pub client: String,
    /// Two letter country code, empty when unknown.
    #[serde(default)]
    pub country: String,
    /// Fraction of the torrent the peer has, in `0.0..=1.0`.
    #[serde(default)]
    pub progress: f32,
    /// Bytes per second received from the peer.
    #[serde(default)]
    pub download_rate: i64,
    /// Bytes per second sent to the peer.
    #[serde(default)]
    pub upload_rate: i64,
    /// Total payload bytes received from the peer.
    #[serde(default)]
    pub downloaded_bytes: i64,
    /// Total payload bytes sent to the peer.
    #[serde(default)]
    pub uploaded_bytes: i64,
}

/// The phase a torrent is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    /// Verifying the data already on disk.
    CheckingFiles,
    /// Waiting for the metadata of a magnet link.
    DownloadingMetadata,
    /// Downloading payload.
    #[default]
    Downloading,
    /// All wanted pieces are on disk.
    Finished,
    /// Uploading to other peers.
    Seeding,
    /// Paused by the user or the queue.
    Paused,
}

impl TransferState {
    /// The lowercase name of the state, as shown to scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckingFiles => "checking_files",
            Self::DownloadingMetadata => "downloading_metadata",
            Self::Downloading => "downloading",
            Self::Finished => "finished",
            Self::Seeding => "seeding",
            Self::Paused => "paused",
        }
    }
}

/// A snapshot of a torrent's transfer status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentStatus {
    /// Display name of the torrent.
    pub name: String,
    /// Current phase.
    pub state: TransferState,
    /// Fraction downloaded, in `0.0..=1.0`.
    pub progress: f32,
    /// Bytes per second received.
    pub download_rate: i64,
    /// Bytes per second sent.
    pub upload_rate: i64,
    /// Total payload bytes received.
    pub downloaded_bytes: i64,
    /// Total payload bytes sent.
    pub uploaded_bytes: i64,
    /// Number of connected peers.
    pub num_peers: i32,
    /// Number of connected seeds.
    pub num_seeds: i32,
    /// Whether the torrent is paused.
    pub is_paused: bool,
    /// Directory the torrent's files are stored in.
    pub save_path: String,
}

/// One file of a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Path relative to the save path.
    pub path: String,
    /// Size in bytes.
    pub size: i64,
}

/// The metadata of a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentInfo {
    /// Name from the info dictionary.
    pub name: String,
    /// Free form comment.
    pub comment: String,
    /// Program that created the torrent.
    pub creator: String,
    /// Sum of all file sizes.
    pub total_size: i64,
    /// Size of one piece in bytes.
    pub piece_length: i32,
    /// Number of pieces.
    pub num_pieces: i32,
    /// Files, in the order of the info dictionary.
    pub files: Vec<FileEntry>,
}

/// Everything the in-memory engine knows about one torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentState {
    /// Identity of the torrent.
    pub info_hash: InfoHash,
    /// Position in the download queue.
    pub queue_position: i32,
    /// User assigned tags.
    pub tags: Vec<String>,
    /// Connected peers.
    pub peers: Vec<PeerInfo>,
    /// Transfer status.
    pub status: TorrentStatus,
    /// Metadata, `None` until it has been resolved.
    pub metadata: Option<TorrentInfo>,
    /// Bytes downloaded per file.
    pub file_progress: Vec<i64>,
}
