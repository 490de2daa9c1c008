use assert_fs::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_with_config(config: &Path, args: &[&OsStr]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("media_collect");
    Command::new(me)
        .env("MEDIA_COLLECT_CONFIG", config)
        .args(args)
        .output()
        .expect("spawn binary")
}

fn src_dst(temp: &assert_fs::TempDir) -> (assert_fs::fixture::ChildPath, assert_fs::fixture::ChildPath) {
    let src = temp.child("src");
    let dst = temp.child("dst");
    src.create_dir_all().unwrap();
    dst.create_dir_all().unwrap();
    (src, dst)
}

#[test]
fn malformed_config_is_a_config_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let (src, dst) = src_dst(&temp);
    src.child("a.jpg").write_str("a").unwrap();
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><log_level>debug</config>").unwrap();

    let out = run_with_config(
        cfg.path(),
        &[OsStr::new("-s"), src.path().as_os_str(), OsStr::new("-d"), dst.path().as_os_str()],
    );
    assert_eq!(out.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&out.stderr).contains("config"));
    assert!(fs::read_dir(dst.path()).unwrap().next().is_none(), "nothing copied");
}

#[test]
fn unknown_config_field_is_rejected() {
    let temp = assert_fs::TempDir::new().unwrap();
    let (src, dst) = src_dst(&temp);
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><colour>blue</colour></config>").unwrap();

    let out = run_with_config(
        cfg.path(),
        &[OsStr::new("-s"), src.path().as_os_str(), OsStr::new("-d"), dst.path().as_os_str()],
    );
    assert_eq!(out.status.code(), Some(255));
}

#[test]
fn max_collisions_from_file_bounds_probing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let (src, dst) = src_dst(&temp);
    src.child("x.png").write_str("new").unwrap();
    dst.child("x.png").write_str("0").unwrap();
    dst.child("x-1.png").write_str("1").unwrap();
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><max_collisions>1</max_collisions></config>").unwrap();

    let out = run_with_config(
        cfg.path(),
        &[
            OsStr::new("-s"),
            src.path().as_os_str(),
            OsStr::new("-d"),
            dst.path().as_os_str(),
            OsStr::new("-r"),
        ],
    );
    // Per-file failures never change the exit status.
    assert!(out.status.success());
    assert!(src.child("x.png").path().exists(), "source kept on failure");
    assert!(!dst.child("x-2.png").path().exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("x.png"));
}

#[test]
fn verbose_flag_beats_quiet_file_level() {
    let temp = assert_fs::TempDir::new().unwrap();
    let (src, dst) = src_dst(&temp);
    src.child("a.jpg").write_str("a").unwrap();
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><log_level>quiet</log_level></config>").unwrap();

    let out = run_with_config(
        cfg.path(),
        &[
            OsStr::new("-v"),
            OsStr::new("-s"),
            src.path().as_os_str(),
            OsStr::new("-d"),
            dst.path().as_os_str(),
        ],
    );
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Copying"));
}

#[test]
fn quiet_file_level_hides_removals() {
    let temp = assert_fs::TempDir::new().unwrap();
    let (src, dst) = src_dst(&temp);
    src.child("a.jpg").write_str("a").unwrap();
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><log_level>quiet</log_level></config>").unwrap();

    let out = run_with_config(
        cfg.path(),
        &[
            OsStr::new("-s"),
            src.path().as_os_str(),
            OsStr::new("-d"),
            dst.path().as_os_str(),
            OsStr::new("-r"),
        ],
    );
    assert!(out.status.success());
    assert!(dst.child("a.jpg").path().exists());
    assert!(!String::from_utf8_lossy(&out.stderr).contains("Removing"));
}

#[test]
fn log_file_from_config_receives_events() {
    let temp = assert_fs::TempDir::new().unwrap();
    // Canonical root so no ancestor is a symlink (macOS /var -> /private/var).
    let root = fs::canonicalize(temp.path()).unwrap();
    let src = root.join("src");
    let dst = root.join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("clip.mov"), "m").unwrap();
    let log = root.join("logs").join("run.log");
    fs::create_dir_all(log.parent().unwrap()).unwrap();
    let cfg = root.join("config.xml");
    fs::write(
        &cfg,
        format!("<config><log_file>{}</log_file></config>", log.display()),
    )
    .unwrap();

    let out = run_with_config(
        &cfg,
        &[
            OsStr::new("-s"),
            src.as_os_str(),
            OsStr::new("-d"),
            dst.as_os_str(),
            OsStr::new("-r"),
        ],
    );
    assert!(out.status.success());
    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Removing"), "log file: {logged}");
    assert!(out.stdout.is_empty());
}
