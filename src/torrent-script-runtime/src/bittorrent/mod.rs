//! Torrent engine objects for script code.
//!
//! [`wrap`] is the only way to create a script-visible torrent handle. Each
//! object it creates owns a private copy of the engine handle, and so does
//! every object reachable from it (peers, status, metadata). Copies are
//! released when the collector finalizes their owning object.

mod handle;
mod info;
mod marshal;
mod peer;
mod status;
mod wrapped;

use rquickjs::{Class, Ctx};
use torrent_script_engine::TorrentHandle;
use tracing::instrument;

pub use handle::TorrentHandleWrapper;
pub use info::TorrentInfoWrapper;
pub use peer::PeerInfoWrapper;
pub use status::TorrentStatusWrapper;
pub use wrapped::WrappedHandle;

/// Create a script object backed by a copy of `handle`.
///
/// The copy is independent of `handle`: the caller may drop its handle right
/// away, and the object keeps working until it is collected.
#[instrument(skip_all, level = "debug", fields(info_hash = %handle.info_hash()))]
pub fn wrap<'js, H: TorrentHandle + ?Sized>(
    ctx: &Ctx<'js>,
    handle: &H,
) -> rquickjs::Result<Class<'js, TorrentHandleWrapper>> {
    Class::instance(
        ctx.clone(),
        TorrentHandleWrapper::new(WrappedHandle::copy_of(handle)),
    )
}
