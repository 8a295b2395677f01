use rquickjs::class::Trace;
use rquickjs::{Class, Ctx, IntoJs as _, JsLifetime, Result, Value};
use torrent_script_engine::PeerInfo;

use super::marshal::Marshal;

/// A connected peer, as seen by script code.
#[rquickjs::class(rename = "PeerInfo")]
#[derive(Trace, JsLifetime)]
pub struct PeerInfoWrapper {
    #[qjs(skip_trace)]
    peer: Box<PeerInfo>,
}

impl PeerInfoWrapper {
    pub fn new(peer: PeerInfo) -> Self {
        Self {
            peer: Box::new(peer),
        }
    }
}

#[rquickjs::methods]
impl PeerInfoWrapper {
    #[qjs(get)]
    pub fn ip(&self) -> String {
        self.peer.endpoint.ip().to_string()
    }

    #[qjs(get)]
    pub fn port(&self) -> u16 {
        self.peer.endpoint.port()
    }

    #[qjs(get)]
    pub fn client(&self) -> String {
        self.peer.client.clone()
    }

    #[qjs(get)]
    pub fn country(&self) -> String {
        self.peer.country.clone()
    }

    #[qjs(get)]
    pub fn progress(&self) -> f64 {
        f64::from(self.peer.progress)
    }

    #[qjs(get, rename = "downloadRate")]
    pub fn download_rate(&self) -> i64 {
        self.peer.download_rate
    }

    #[qjs(get, rename = "uploadRate")]
    pub fn upload_rate(&self) -> i64 {
        self.peer.upload_rate
    }

    #[qjs(get, rename = "downloadedBytes")]
    pub fn downloaded_bytes(&self) -> i64 {
        self.peer.downloaded_bytes
    }

    #[qjs(get, rename = "uploadedBytes")]
    pub fn uploaded_bytes(&self) -> i64 {
        self.peer.uploaded_bytes
    }
}

impl Marshal for PeerInfo {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>> {
        Class::instance(ctx.clone(), PeerInfoWrapper::new(self))?.into_js(ctx)
    }
}
