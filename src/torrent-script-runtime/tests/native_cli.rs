use std::fs::write;
use std::process::Command;

use escargot::CargoBuild;
use tempfile::tempdir;

const TORRENT: &str = r#"{
    "infoHash": "00112233445566778899aabbccddeeff00112233",
    "queuePosition": 2,
    "tags": ["linux"],
    "peers": [
        { "endpoint": "10.0.0.1:6881", "client": "qB" },
        { "endpoint": "10.0.0.2:6881", "client": "Transmission" }
    ],
    "status": { "name": "ubuntu.iso", "state": "downloading" }
}"#;

#[test]
fn smoke_test() {
    let dir = tempdir().unwrap();

    write(
        dir.path().join("index.js"),
        r#"
            import * as format from './format.js';
            function handler(torrent) {
                console.log(torrent.getTags().join(","));
                torrent.pause();
                return format.summary(torrent);
            }
        "#,
    )
    .unwrap();

    write(
        dir.path().join("format.js"),
        r#"
            const summary = (t) => ({
                hash: t.infoHash,
                peers: t.getPeers().map(p => p.client),
                paused: t.getStatus().isPaused,
            });
            export { summary };
        "#,
    )
    .unwrap();

    write(dir.path().join("torrent.json"), TORRENT).unwrap();

    let output = js_runtime_cli()
        .arg(dir.path().join("./index.js"))
        .arg(dir.path().join("torrent.json"))
        .arg("--gc")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = stdout.trim().lines().collect::<Vec<_>>();

    assert_eq!(
        lines,
        [
            "linux",
            r#"Handler result: {"hash":"00112233445566778899aabbccddeeff00112233","peers":["qB","Transmission"],"paused":true}"#,
        ]
    );
}

#[test]
fn reports_script_exceptions() {
    let dir = tempdir().unwrap();

    write(
        dir.path().join("index.js"),
        r#"
            function handler(torrent) {
                torrent.moveStorage(42);
                return true;
            }
        "#,
    )
    .unwrap();
    write(dir.path().join("torrent.json"), TORRENT).unwrap();

    let output = js_runtime_cli()
        .arg(dir.path().join("index.js"))
        .arg(dir.path().join("torrent.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("moveStorage expects the target path as a string"),
        "unexpected stderr: {stderr}"
    );
}

fn js_runtime_cli() -> Command {
    CargoBuild::new()
        .manifest_path(env!("CARGO_MANIFEST_PATH"))
        .bin("torrent-script-runtime")
        .current_release()
        .current_target()
        .run()
        .unwrap()
        .command()
}
