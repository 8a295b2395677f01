use rquickjs::{Array, Ctx, IntoJs as _, Result, Value};

/// A native engine value that can be handed to script code.
///
/// Scalars convert directly. Engine records convert into their own wrapper
/// object, which owns a private copy of the record and is released by the
/// collector independently of whatever produced it.
pub trait Marshal {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>>;
}

impl Marshal for String {
    fn marshal<'js>(self, ctx: &Ctx<'js>) -> Result<Value<'js>> {
        self.into_js(ctx)
    }
}

/// Convert an ordered native collection into a script array.
///
/// Element order is preserved and an empty collection becomes an empty array.
pub fn sequence<'js, T: Marshal>(
    ctx: &Ctx<'js>,
    items: impl IntoIterator<Item = T>,
) -> Result<Array<'js>> {
    let array = Array::new(ctx.clone())?;
    for (index, item) in items.into_iter().enumerate() {
        array.set(index, item.marshal(ctx)?)?;
    }
    Ok(array)
}

/// Convert a value the engine may not have yet. Absence becomes `null`.
pub fn optional<'js, T: Marshal>(ctx: &Ctx<'js>, item: Option<T>) -> Result<Value<'js>> {
    match item {
        Some(item) => item.marshal(ctx),
        None => Ok(Value::new_null(ctx.clone())),
    }
}
