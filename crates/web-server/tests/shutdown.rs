#![cfg(unix)]

use std::process::Command;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn sigterm_resolves_shutdown_signal() {
    let signal = tokio::spawn(web_server::shutdown_signal());
    // Give the task time to install its handlers before signalling.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    tokio::time::timeout(Duration::from_secs(5), signal)
        .await
        .expect("shutdown signal did not resolve")
        .unwrap();
}
