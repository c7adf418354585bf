use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// A small photo library:
///
/// ```text
/// album/one.jpg
/// album/deeper/two.png
/// beach.jpg
/// hidden/.nomedia
/// hidden/secret.jpg
/// logo.svg
/// notes.txt
/// ```
fn create_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let base = dir.path();

    fs::write(base.join("beach.jpg"), b"jpeg").unwrap();
    fs::write(base.join("logo.svg"), b"<svg/>").unwrap();
    fs::write(base.join("notes.txt"), b"text").unwrap();

    let album = base.join("album");
    fs::create_dir_all(album.join("deeper")).unwrap();
    fs::write(album.join("one.jpg"), b"one").unwrap();
    fs::write(album.join("deeper").join("two.png"), b"two").unwrap();

    let hidden = base.join("hidden");
    fs::create_dir(&hidden).unwrap();
    fs::write(hidden.join(".nomedia"), b"").unwrap();
    fs::write(hidden.join("secret.jpg"), b"secret").unwrap();

    dir
}

/// `gallery` with its configuration isolated in `config_home`
fn gallery(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gallery").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1");
    cmd
}

fn scan_json(config_home: &TempDir, args: &[&str]) -> Vec<Value> {
    let output = gallery(config_home)
        .arg("scan")
        .args(args)
        .args(["--format", "json", "--no-progress"])
        .output()
        .unwrap();
    assert!(output.status.success(), "scan failed: {output:?}");

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    value.as_array().cloned().unwrap()
}

fn paths(media: &[Value]) -> Vec<&str> {
    media.iter().filter_map(|m| m["path"].as_str()).collect()
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("gallery").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_scan_json() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    let media = scan_json(&config_home, &[library.path().to_str().unwrap()]);

    assert_eq!(
        paths(&media),
        vec!["album/deeper/two.png", "album/one.jpg", "beach.jpg"]
    );
    assert_eq!(media[1]["mimetype"], "image/jpeg");
    assert_eq!(media[1]["size"], 3);
    assert_eq!(media[1]["sharedWithUser"], false);
}

#[test]
fn test_scan_with_type_filter() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    let media = scan_json(
        &config_home,
        &[library.path().to_str().unwrap(), "--type", "image/png"],
    );

    assert_eq!(paths(&media), vec!["album/deeper/two.png"]);
}

#[test]
fn test_scan_native_svg_feature() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    let media = scan_json(
        &config_home,
        &[library.path().to_str().unwrap(), "-F", "native_svg"],
    );

    assert!(paths(&media).contains(&"logo.svg"));
    assert_eq!(media.len(), 4);
}

#[test]
fn test_scan_max_depth() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    let media = scan_json(
        &config_home,
        &[library.path().to_str().unwrap(), "--max-depth", "1"],
    );

    assert_eq!(paths(&media), vec!["album/one.jpg", "beach.jpg"]);
}

#[test]
fn test_scan_marker_from_environment() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();
    fs::write(library.path().join("album").join(".skip"), b"").unwrap();

    let output = gallery(&config_home)
        .env("GALLERY_DISCOVERY__MARKER_NAME", ".skip")
        .args(["scan", "--format", "jsonl", "--no-progress"])
        .arg(library.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let found: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // The album is now excluded while the `.nomedia` folder is walked
    assert_eq!(paths(&found), vec!["beach.jpg", "hidden/secret.jpg"]);
}

#[test]
fn test_scan_csv() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["scan", "--format", "csv", "--no-progress"])
        .arg(library.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "path,fileid,mimetype,mtime,etag,size,sharedWithUser",
        ))
        .stdout(predicate::str::contains("beach.jpg"))
        .stdout(predicate::str::contains("secret.jpg").not());
}

#[test]
fn test_scan_text() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["scan", "--no-progress"])
        .arg(library.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("album/one.jpg"))
        .stdout(predicate::str::contains("image/png"));
}

#[test]
fn test_scan_missing_path() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .arg("scan")
        .arg(library.path().join("missing"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_scan_rejects_malformed_type() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["scan", "--type", "jpeg"])
        .arg(library.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a MIME type"));
}

#[test]
fn test_info_by_id() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();
    let media = scan_json(&config_home, &[library.path().to_str().unwrap()]);
    let id = media[2]["fileid"].as_u64().unwrap();

    let output = gallery(&config_home)
        .arg("info")
        .arg(library.path())
        .arg(id.to_string())
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, media[2]);
}

#[test]
fn test_info_unknown_id() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .arg("info")
        .arg(library.path())
        .arg(u64::MAX.to_string())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Resource not found"));
}

#[test]
fn test_completions() {
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gallery"));
}

#[cfg(unix)]
#[test]
fn test_config_set_get() {
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["config", "set", "discovery.max_depth", "3"])
        .assert()
        .success();

    gallery(&config_home)
        .args(["config", "get", "discovery.max_depth"])
        .assert()
        .success()
        .stdout("3\n");

    gallery(&config_home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gallery/config.toml"));
}

#[cfg(unix)]
#[test]
fn test_config_set_rejects_invalid_marker() {
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["config", "set", "discovery.marker_name", "a/b"])
        .assert()
        .code(2);

    assert!(!config_home.path().join("gallery/config.toml").exists());
}

#[cfg(unix)]
#[test]
fn test_configured_features_apply_to_scan() {
    let library = create_library();
    let config_home = TempDir::new().unwrap();

    gallery(&config_home)
        .args(["config", "set", "discovery.features", "native_svg"])
        .assert()
        .success();

    let media = scan_json(&config_home, &[library.path().to_str().unwrap()]);
    assert!(paths(&media).contains(&"logo.svg"));
}
