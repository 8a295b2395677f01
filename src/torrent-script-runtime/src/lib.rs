//! A JavaScript runtime that hands torrent engine handles to handler scripts.
//!
//! Handler scripts are modules exporting a `handler` function. They receive
//! either a JSON event or a wrapped torrent handle (see [`bittorrent`]) and
//! return a value that is serialized back to JSON.

pub mod bittorrent;
mod globals;
pub mod host;
mod modules;

use std::rc::Rc;

use anyhow::{Context as _, anyhow};
use hashbrown::HashMap;
use rquickjs::loader::{Loader, Resolver};
use rquickjs::promise::MaybePromise;
use rquickjs::{Context, Ctx, Function, IntoJs as _, Module, Persistent, Result, Runtime, Value};
use torrent_script_engine::TorrentHandle;
use tracing::instrument;

use crate::host::Host;
use crate::modules::NativeModuleLoader;

/// A handler is a javascript function that takes a single `event` object parameter,
/// and is registered to the static `Context` instance
#[derive(Clone)]
struct Handler<'a> {
    func: Persistent<Function<'a>>,
}

/// Owns the QuickJS runtime and the registered handlers.
///
/// Everything runs on the calling thread. Script objects, and the native
/// copies they own, are released by the QuickJS collector: usually as soon as
/// their last reference goes away, at the latest on the next collection cycle
/// or when the runtime is dropped.
pub struct ScriptRuntime {
    context: Context,
    handlers: HashMap<String, Handler<'static>>,
}

impl ScriptRuntime {
    /// Create a new `ScriptRuntime` with the given host.
    /// The resulting runtime will have global objects registered.
    #[instrument(skip_all, level = "info")]
    pub fn new<H: Host + 'static>(host: H) -> anyhow::Result<Self> {
        let runtime = Runtime::new().context("Unable to initialize the JS runtime")?;
        let context = Context::full(&runtime).context("Unable to create JS context")?;

        // The globals are backed by native modules, so the loader has to be in place first.
        let loader = (NativeModuleLoader, ModuleLoader::new(host));
        runtime.set_loader(loader.clone(), loader);

        context.with(|ctx| globals::setup(&ctx).catch(&ctx))?;

        Ok(Self {
            context,
            handlers: HashMap::new(),
        })
    }

    /// Register a handler function with the runtime.
    /// The handler script is a JavaScript module that exports a function named `handler`.
    /// A script without any `export` gets `export { handler };` appended.
    #[instrument(skip_all, level = "info")]
    pub fn register_handler(
        &mut self,
        function_name: impl Into<String>,
        handler_script: impl Into<String>,
        handler_pwd: impl Into<String>,
    ) -> anyhow::Result<()> {
        let function_name = function_name.into();
        let handler_script = handler_script.into();
        let handler_pwd = handler_pwd.into();

        let handler_script = if !handler_script.contains("export") {
            format!("{handler_script}\nexport {{ handler }};")
        } else {
            handler_script
        };

        // Relative imports inside the handler resolve against this virtual path.
        let handler_path = make_handler_path(&function_name, &handler_pwd);

        let func = self.context.with(|ctx| -> anyhow::Result<_> {
            let module = Module::declare(ctx.clone(), handler_path.as_str(), handler_script)
                .catch(&ctx)?;

            let (module, promise) = module.eval().catch(&ctx)?;

            promise.finish::<()>().catch(&ctx)?;

            let handler_func: Function = module.get("handler").catch(&ctx)?;

            // Persistent so it can outlive this `with` closure.
            Ok(Persistent::save(&ctx, handler_func))
        })?;

        self.handlers.insert(function_name, Handler { func });

        Ok(())
    }

    /// Unload a registered handler. Script objects only the handler's module
    /// still reaches are finalized on the next collection.
    #[instrument(skip(self), level = "info")]
    pub fn unregister_handler(&mut self, function_name: &str) -> anyhow::Result<()> {
        self.handlers
            .remove(function_name)
            .with_context(|| format!("No handler registered for function {function_name}"))?;
        Ok(())
    }

    /// Run a registered handler with the given event, passed as a JSON string.
    /// The handler's return value is returned serialized as JSON.
    /// If `run_gc` is true, a garbage collection cycle runs after the handler.
    #[instrument(skip(self, event), level = "info")]
    pub fn run_handler(
        &mut self,
        function_name: &str,
        event: String,
        run_gc: bool,
    ) -> anyhow::Result<String> {
        self.call_handler(function_name, run_gc, |ctx| ctx.json_parse(event))
    }

    /// Run a registered handler with a script object wrapping `torrent`.
    ///
    /// The object owns its own copy of the handle, so the handler may keep it
    /// (e.g. on `globalThis`) and use it in later runs.
    #[instrument(skip(self, torrent), level = "info")]
    pub fn run_torrent_handler<T: TorrentHandle + ?Sized>(
        &mut self,
        function_name: &str,
        torrent: &T,
        run_gc: bool,
    ) -> anyhow::Result<String> {
        self.call_handler(function_name, run_gc, |ctx| {
            bittorrent::wrap(ctx, torrent)?.into_js(ctx)
        })
    }

    /// Run a garbage collection cycle now, finalizing every unreachable script
    /// object.
    pub fn collect_garbage(&mut self) {
        self.context.with(|ctx| ctx.run_gc());
    }

    fn call_handler(
        &mut self,
        function_name: &str,
        run_gc: bool,
        argument: impl for<'js> FnOnce(&Ctx<'js>) -> Result<Value<'js>>,
    ) -> anyhow::Result<String> {
        let handler = self
            .handlers
            .get(function_name)
            .with_context(|| format!("No handler registered for function {function_name}"))?
            .clone();

        self.context.with(|ctx| {
            let _gc_guard = MaybeRunGcGuard::new(run_gc, &ctx);

            let func = handler.func.clone().restore(&ctx).catch(&ctx)?;

            let arg = argument(&ctx).catch(&ctx)?;

            // A handler returning a promise that settles right away is awaited.
            let promise: MaybePromise = func.call((arg,)).catch(&ctx)?;
            let obj: Value = promise.finish().catch(&ctx)?;

            ctx.json_stringify(obj)
                .catch(&ctx)?
                .context("The handler function did not return a value")?
                .to_string()
                .catch(&ctx)
        })
    }
}

impl Drop for ScriptRuntime {
    fn drop(&mut self) {
        // Persistent references must go before the Context, otherwise the
        // runtime aborts on drop because of the leaked handler functions.
        self.handlers.clear();
    }
}

// Resolves and loads the handler's own modules through the host.
#[derive(Clone)]
struct ModuleLoader {
    host: Rc<dyn Host>,
}

impl ModuleLoader {
    fn new(host: impl Host + 'static) -> Self {
        Self {
            host: Rc::new(host),
        }
    }
}

impl Resolver for ModuleLoader {
    fn resolve(&mut self, _ctx: &Ctx<'_>, base: &str, name: &str) -> Result<String> {
        // quickjs passes the importing module's path, the host wants its directory
        let (dir, _) = base.rsplit_once('/').unwrap_or((".", ""));

        let path = self
            .host
            .resolve_module(dir.to_string(), name.to_string())
            .map_err(|_err| rquickjs::Error::new_resolving(base, name))?;

        Ok(path.replace('\\', "/"))
    }
}

impl Loader for ModuleLoader {
    fn load<'js>(&mut self, ctx: &Ctx<'js>, name: &str) -> Result<Module<'js>> {
        let source = self
            .host
            .load_module(name.to_string())
            .map_err(|_err| rquickjs::Error::new_loading(name))?;

        Module::declare(ctx.clone(), name, source)
    }
}

fn make_handler_path(function_name: &str, handler_dir: &str) -> String {
    let handler_dir = match handler_dir.replace('\\', "/") {
        dir if dir.is_empty() => ".".to_string(),
        dir => dir.trim_end_matches('/').to_string(),
    };
    format!("{handler_dir}/{function_name}.js")
}

trait CatchJsErrorExt {
    type Ok;
    fn catch(self, ctx: &Ctx<'_>) -> anyhow::Result<Self::Ok>;
}

impl<T> CatchJsErrorExt for rquickjs::Result<T> {
    type Ok = T;
    fn catch(self, ctx: &Ctx<'_>) -> anyhow::Result<T> {
        rquickjs::CatchResultExt::catch(self, ctx).map_err(|e| anyhow!("Runtime error: {e}"))
    }
}

// Runs a GC cycle on drop when requested, so every exit path of a handler run collects.
struct MaybeRunGcGuard<'a> {
    run_gc: bool,
    ctx: Ctx<'a>,
}

impl<'a> MaybeRunGcGuard<'a> {
    fn new(run_gc: bool, ctx: &Ctx<'a>) -> Self {
        Self {
            run_gc,
            ctx: ctx.clone(),
        }
    }
}

impl Drop for MaybeRunGcGuard<'_> {
    fn drop(&mut self) {
        if self.run_gc {
            self.ctx.run_gc();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::make_handler_path;

    #[test]
    fn handler_path_defaults() {
        assert_eq!(make_handler_path("handler", ""), "./handler.js");
        assert_eq!(make_handler_path("on_added", "/scripts/"), "/scripts/on_added.js");
        assert_eq!(make_handler_path("on_added", "dir\\sub\\"), "dir/sub/on_added.js");
        assert_eq!(make_handler_path("on_added", "/"), "/on_added.js");
    }
}
