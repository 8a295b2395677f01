use std::ops::Deref;

use torrent_script_engine::{InfoHash, TorrentHandle};
use tracing::trace;

/// A private copy of an engine handle, owned by exactly one script object.
///
/// The copy is taken when the script object is created and released when the
/// script object is finalized by the collector, which is when the owning class
/// instance is dropped. It never leaves the object that owns it: nested
/// wrappers that need a handle take their own copy with [`duplicate`].
///
/// [`duplicate`]: WrappedHandle::duplicate
pub struct WrappedHandle {
    handle: Box<dyn TorrentHandle>,
    // Captured up front so that releasing the copy does not call into the engine.
    info_hash: InfoHash,
}

impl WrappedHandle {
    /// Take an independent copy of `handle`.
    pub fn copy_of<H: TorrentHandle + ?Sized>(handle: &H) -> Self {
        let handle = handle.clone_handle();
        let info_hash = handle.info_hash();
        trace!(%info_hash, "copied torrent handle");
        Self { handle, info_hash }
    }

    /// Take another independent copy of the same handle.
    pub fn duplicate(&self) -> Self {
        Self::copy_of(&*self.handle)
    }
}

impl Deref for WrappedHandle {
    type Target = dyn TorrentHandle;

    fn deref(&self) -> &Self::Target {
        &*self.handle
    }
}

impl Drop for WrappedHandle {
    fn drop(&mut self) {
        trace!(info_hash = %self.info_hash, "releasing torrent handle");
    }
}
