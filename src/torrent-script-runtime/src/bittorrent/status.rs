use rquickjs::class::Trace;
use rquickjs::{Class, Ctx, IntoJs as _, JsLifetime, Result, Value};
use torrent_script_engine::TorrentStatus;

use super::marshal::Marshal;

/// A status snapshot. The values are those of the moment `getStatus()` was
/// called; a fresh snapshot needs another call.
#[rquickjs::class(rename = "TorrentStatus")]
#[derive(Trace, JsLifetime)]
pub struct TorrentStatusWrapper {
    #[qjs(skip_trace)]
    status: Box<TorrentStatus>,
}

impl TorrentStatusWrapper {
    pub fn new(status: TorrentStatus) -> Self {
        Self {
            status: Box::new(status),
        }
    }
}

#[rquickjs::methods]
impl TorrentStatusWrapper {
    #[qjs(get)]
    pub fn name(&self) -> String {
        self.status.name.clone()
    }

    #[qjs(get)]
    pub fn state(&self) -> String {
        self.status.state.as_str().to_string()
    }

    #[qjs(get)]
    pub fn progress(&self) -> f64 {
        f64::from(self.status.progress)
    }

    #[qjs(get, rename = "downloadRate")]
    pub fn download_rate(&self) -> i64 {
        self.status.download_rate
    }

    #[qjs(get, rename = "uploadRate")]
    pub fn upload_rate(&self) -> i64 {
        self.status.upload_rate
    }

    #[qjs(get, rename = "downloadedBytes")]
    pub fn downloaded_bytes(&self) -> i64 {
        self.status.downloaded_bytes
    }

    #[qjs(get, rename = "uploadedBytes")]
    pub fn uploaded_bytes(&self) -> i64 {
        self.status.uploaded_bytes
    }

    #[qjs(get, rename = "numPeers")]
    pub fn num_peers(&self) -> i32 {
        self.status.num_peers
    }

    #[qjs(get, rename = "numSeeds")]
    pub fn num_seeds(&self) -> i32 {
        self.status.num_seeds
    }

    #[qjs(get, rename = "isPaused")]
    pub fn is_paused(&self) -> bool {
        self.status.is_paused
    }

    #[qjs(get, rename = "savePath")]
    pub fn save_path(&self) -> String {
        self.status.save_path.clone()
    }
}

impl Marshal for TorrentStatus {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>> {
        Class::instance(ctx.clone(), TorrentStatusWrapper::new(self))?.into_js(ctx)
    }
}
