use hashbrown::HashMap;
use rquickjs::loader::{Loader, Resolver};
use rquickjs::module::ModuleDef;
use rquickjs::{Ctx, Module, Result};
use spin::Lazy;

pub mod console;
pub mod io;

/// Declares a native module under the given name.
type Declare = for<'js> fn(Ctx<'js>, &str) -> Result<Module<'js>>;

// `Module::declare_def::<M, _>` cannot be turned into a `Declare` directly,
// the lifetimes only line up through an explicitly annotated function.
fn declare<M: ModuleDef>() -> Declare {
    fn declare_def<'js, M: ModuleDef>(ctx: Ctx<'js>, name: &str) -> Result<Module<'js>> {
        Module::declare_def::<M, _>(ctx, name)
    }
    declare_def::<M>
}

static NATIVE_MODULES: Lazy<HashMap<&'static str, Declare>> = Lazy::new(|| {
    HashMap::from([
        ("io", declare::<io::js_io>()),
        ("console", declare::<console::js_console>()),
    ])
});

/// Resolves and loads the modules implemented in Rust. Native module names
/// are bare (`import { log } from "console"`) and take precedence over the
/// host's modules.
#[derive(Clone)]
pub struct NativeModuleLoader;

impl Resolver for NativeModuleLoader {
    fn resolve(&mut self, _ctx: &Ctx<'_>, base: &str, name: &str) -> Result<String> {
        match NATIVE_MODULES.get_key_value(name) {
            Some((name, _)) => Ok((*name).to_string()),
            None => Err(rquickjs::Error::new_resolving(base, name)),
        }
    }
}

impl Loader for NativeModuleLoader {
    fn load<'js>(&mut self, ctx: &Ctx<'js>, name: &str) -> Result<Module<'js>> {
        match NATIVE_MODULES.get(name) {
            Some(declare) => declare(ctx.clone(), name),
            None => Err(rquickjs::Error::new_loading(name)),
        }
    }
}
