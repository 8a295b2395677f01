use rquickjs::Coerced;
use rquickjs::prelude::Rest;

use super::io::eprint;
use super::io::io::print;

/// Joins the arguments of a console call the way browsers do: coerced to
/// strings, separated by single spaces, terminated by a newline.
fn format_line(txt: Rest<Coerced<String>>) -> String {
    let mut txt = txt
        .into_inner()
        .into_iter()
        .map(|mut c| {
            c.0.push(' ');
            c.0
        })
        .collect::<String>();
    txt.pop(); // remove the last space
    txt.push('\n');
    txt
}

#[rquickjs::module(rename_vars = "camelCase", rename_types = "camelCase")]
#[allow(clippy::module_inception)]
pub mod console {
    use super::*;

    #[rquickjs::function]
    pub fn log(txt: Rest<Coerced<String>>) -> rquickjs::Result<()> {
        print(format_line(txt));
        Ok(())
    }

    #[rquickjs::function]
    pub fn error(txt: Rest<Coerced<String>>) -> rquickjs::Result<()> {
        eprint(format_line(txt));
        Ok(())
    }
}
