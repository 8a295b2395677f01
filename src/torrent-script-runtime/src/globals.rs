use rquickjs::object::Property;
use rquickjs::{Ctx, Function, Module, Object};

/// Install the globals every handler script can rely on: `print` and `console`.
///
/// Both are backed by the native modules, which must therefore be resolvable
/// when this runs.
pub fn setup(ctx: &Ctx<'_>) -> rquickjs::Result<()> {
    let globals = ctx.globals();

    let io: Object = Module::import(ctx, "io")?.finish()?;
    globals.prop("print", Property::from(io.get::<_, Function>("print")?))?;

    let console: Object = Module::import(ctx, "console")?.finish()?;
    globals.prop("console", Property::from(console))?;

    Ok(())
}
