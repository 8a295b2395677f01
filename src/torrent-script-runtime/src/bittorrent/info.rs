use rquickjs::class::Trace;
use rquickjs::{Array, Class, Ctx, IntoJs as _, JsLifetime, Object, Result, Value};
use torrent_script_engine::TorrentInfo;

use super::marshal::{self, Marshal};
use super::wrapped::WrappedHandle;

/// Torrent metadata, as seen by script code.
///
/// Besides its own copy of the metadata it keeps its own copy of the handle,
/// so that per-file progress can be looked up after the handle object that
/// produced it has been collected.
#[rquickjs::class(rename = "TorrentInfo")]
#[derive(Trace, JsLifetime)]
pub struct TorrentInfoWrapper {
    #[qjs(skip_trace)]
    handle: WrappedHandle,
    #[qjs(skip_trace)]
    info: Box<TorrentInfo>,
}

impl TorrentInfoWrapper {
    pub fn new(handle: WrappedHandle, info: TorrentInfo) -> Self {
        Self {
            handle,
            info: Box::new(info),
        }
    }
}

#[rquickjs::methods(rename_all = "camelCase")]
impl TorrentInfoWrapper {
    #[qjs(get)]
    pub fn name(&self) -> String {
        self.info.name.clone()
    }

    #[qjs(get)]
    pub fn comment(&self) -> String {
        self.info.comment.clone()
    }

    #[qjs(get)]
    pub fn creator(&self) -> String {
        self.info.creator.clone()
    }

    #[qjs(get, rename = "totalSize")]
    pub fn total_size(&self) -> i64 {
        self.info.total_size
    }

    #[qjs(get, rename = "pieceLength")]
    pub fn piece_length(&self) -> i32 {
        self.info.piece_length
    }

    #[qjs(get, rename = "numPieces")]
    pub fn num_pieces(&self) -> i32 {
        self.info.num_pieces
    }

    #[qjs(get, rename = "infoHash")]
    pub fn info_hash(&self) -> String {
        self.handle.info_hash().to_hex()
    }

    /// The files of the torrent with the bytes downloaded so far for each.
    pub fn get_files<'js>(&self, ctx: Ctx<'js>) -> Result<Array<'js>> {
        let progress = self.handle.file_progress();
        let files = self.info.files.iter().enumerate().map(|(index, file)| FileView {
            path: file.path.clone(),
            size: file.size,
            progress: progress.get(index).copied().unwrap_or_default(),
        });
        marshal::sequence(&ctx, files)
    }
}

impl Marshal for TorrentInfoWrapper {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>> {
        Class::instance(ctx.clone(), self)?.into_js(ctx)
    }
}

/// One entry of `getFiles()`. Plain data, so it becomes a plain object.
struct FileView {
    path: String,
    size: i64,
    progress: i64,
}

impl Marshal for FileView {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>> {
        let file = Object::new(ctx.clone())?;
        file.set("path", self.path)?;
        file.set("size", self.size)?;
        file.set("progress", self.progress)?;
        file.into_js(ctx)
    }
}
