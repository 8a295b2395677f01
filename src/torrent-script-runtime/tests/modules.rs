//! Tests for the native modules available to handler scripts.

#![allow(clippy::disallowed_macros)]

use torrent_script_runtime::ScriptRuntime;
use torrent_script_runtime::host::NoHost;

fn run(script: &str) -> String {
    let mut runtime = ScriptRuntime::new(NoHost).unwrap();
    runtime.register_handler("handler", script, ".").unwrap();
    runtime.run_handler("handler", "{}".to_string(), false).unwrap()
}

#[test]
fn io_exports_print_and_flush_only() {
    let res = run(
        r#"
        import * as io from "io";
        export function handler() {
            return [typeof io.print, typeof io.flush, typeof io.eprint];
        }
        "#,
    );

    assert_eq!(res, r#"["function","function","undefined"]"#);
}

#[test]
fn console_exports_log_and_error() {
    let res = run(
        r#"
        import * as console from "console";
        export function handler() {
            console.error("to", "stderr");
            return [typeof console.log, typeof console.error];
        }
        "#,
    );

    assert_eq!(res, r#"["function","function"]"#);
}
