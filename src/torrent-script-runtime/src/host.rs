use anyhow::Result;

/// The environment a [`ScriptRuntime`](crate::ScriptRuntime) loads handler
/// modules from.
///
/// Native modules (`io`, `console`) are always available; every other import
/// goes through this trait.
pub trait Host {
    /// Resolve a module name to a module specifier (usually a path).
    /// The base is the directory of the module that is importing the module.
    fn resolve_module(&self, base: String, name: String) -> Result<String>;

    /// Obtain the module source code for a given module specifier.
    fn load_module(&self, name: String) -> Result<String>;
}

/// A host that refuses every import. Handlers run with it can only use the
/// native modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl Host for NoHost {
    fn resolve_module(&self, base: String, name: String) -> Result<String> {
        anyhow::bail!("Cannot resolve module {name:?} from {base:?}: imports are disabled")
    }

    fn load_module(&self, name: String) -> Result<String> {
        anyhow::bail!("Cannot load module {name:?}: imports are disabled")
    }
}
