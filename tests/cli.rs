use std::process::Command;

const VARS: [&str; 4] = [
    "BITBUCKET_WORKSPACE",
    "BITBUCKET_EMAIL",
    "BITBUCKET_API_TOKEN",
    "BITBUCKET_API_URL",
];

fn command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bitbucket-stats"));
    cmd.current_dir(dir);
    for var in VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_missing_environment_exits_without_writing_report() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("repositories.list"), "web-app\n").unwrap();

    let output = command(dir.path())
        .env("BITBUCKET_WORKSPACE", "acme")
        .args(["--repos", "repositories.list"])
        .output()
        .expect("Failed to execute bitbucket-stats");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required environment variables"));
    for var in &VARS[..3] {
        assert!(stderr.contains(var), "stderr should name {var}: {stderr}");
    }
    assert!(!dir.path().join("bitbucket-stats.json").exists());
}

#[test]
fn test_unreachable_api_exits_without_writing_report() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("repositories.list"), "web-app\n").unwrap();
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);

    let output = command(dir.path())
        .env("BITBUCKET_WORKSPACE", "acme")
        .env("BITBUCKET_EMAIL", "dev@acme.io")
        .env("BITBUCKET_API_TOKEN", "secret")
        .env("BITBUCKET_API_URL", format!("http://{addr}/2.0"))
        .args(["--repos", "repositories.list"])
        .output()
        .expect("Failed to execute bitbucket-stats");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to connect"), "{stderr}");
    assert!(!dir.path().join("bitbucket-stats.json").exists());
}
