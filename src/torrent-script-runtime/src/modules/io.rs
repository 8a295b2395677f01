use std::io::Write as _;

/// Writes to stderr. Not exported to scripts, `console.error` goes through it.
pub(crate) fn eprint(txt: String) {
    let mut stderr = std::io::stderr().lock();
    // A closed stderr is not something a handler script can act on.
    let _ = stderr.write_all(txt.as_bytes());
}

#[rquickjs::module(rename_vars = "camelCase", rename_types = "camelCase")]
#[allow(clippy::module_inception)]
pub mod io {
    use super::*;

    #[rquickjs::function]
    pub fn print(txt: String) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(txt.as_bytes());
        let _ = stdout.flush();
    }

    #[rquickjs::function]
    pub fn flush() {
        let _ = std::io::stdout().flush();
    }
}
