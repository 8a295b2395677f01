use rquickjs::class::Trace;
use rquickjs::{Array, Ctx, Exception, JsLifetime, Result, Value};

use super::info::TorrentInfoWrapper;
use super::marshal::{self, Marshal as _};
use super::wrapped::WrappedHandle;

/// The script-visible torrent handle.
///
/// The native copy lives in the class instance's opaque storage, which script
/// code cannot read or replace. Every method and getter resolves its receiver
/// back to this type before touching the engine; a receiver that is not a
/// wrapped handle (a plain object, the prototype itself, ...) makes the call
/// throw before the engine is reached.
#[rquickjs::class(rename = "TorrentHandle")]
#[derive(Trace, JsLifetime)]
pub struct TorrentHandleWrapper {
    #[qjs(skip_trace)]
    handle: WrappedHandle,
}

impl TorrentHandleWrapper {
    pub(crate) fn new(handle: WrappedHandle) -> Self {
        Self { handle }
    }
}

#[rquickjs::methods(rename_all = "camelCase")]
impl TorrentHandleWrapper {
    pub fn get_peers<'js>(&self, ctx: Ctx<'js>) -> Result<Array<'js>> {
        marshal::sequence(&ctx, self.handle.peers())
    }

    pub fn get_status<'js>(&self, ctx: Ctx<'js>) -> Result<Value<'js>> {
        self.handle.status().marshal(&ctx)
    }

    /// `null` while the engine has no metadata for the torrent yet.
    pub fn get_torrent_info<'js>(&self, ctx: Ctx<'js>) -> Result<Value<'js>> {
        let info = self
            .handle
            .torrent_file()
            .map(|info| TorrentInfoWrapper::new(self.handle.duplicate(), info));
        marshal::optional(&ctx, info)
    }

    pub fn move_storage<'js>(&self, ctx: Ctx<'js>, path: Value<'js>) -> Result<()> {
        let Some(path) = path.as_string() else {
            return Err(Exception::throw_type(
                &ctx,
                "moveStorage expects the target path as a string",
            ));
        };
        let path = path.to_string()?;
        self.handle
            .move_storage(&path)
            .map_err(|e| Exception::throw_message(&ctx, &format!("{e:#}")))
    }

    pub fn pause(&self) {
        self.handle.pause();
    }

    pub fn resume(&self) {
        self.handle.resume();
    }

    pub fn get_info_hash(&self) -> String {
        self.handle.info_hash().to_hex()
    }

    pub fn get_queue_position(&self) -> i32 {
        self.handle.queue_position()
    }

    pub fn get_tags<'js>(&self, ctx: Ctx<'js>) -> Result<Array<'js>> {
        marshal::sequence(&ctx, self.handle.tags())
    }

    #[qjs(get, rename = "infoHash")]
    pub fn info_hash_property(&self) -> String {
        self.get_info_hash()
    }

    #[qjs(get, rename = "queuePosition")]
    pub fn queue_position_property(&self) -> i32 {
        self.get_queue_position()
    }

    #[qjs(get, rename = "tags")]
    pub fn tags_property<'js>(&self, ctx: Ctx<'js>) -> Result<Array<'js>> {
        self.get_tags(ctx)
    }
}
