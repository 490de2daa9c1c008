use assert_fs::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(config_dir: &Path, args: &[&OsStr]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("media_collect");
    Command::new(me)
        // Point at a file that does not exist so a user's config never leaks in.
        .env("MEDIA_COLLECT_CONFIG", config_dir.join("absent.xml"))
        .args(args)
        .output()
        .expect("spawn binary")
}

fn os(s: &str) -> &OsStr {
    OsStr::new(s)
}

fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn copies_media_flat_and_leaves_sources() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    let dst = temp.child("dst");
    src.child("a/photo.jpg").write_str("photo").unwrap();
    src.child("a/notes.txt").write_str("notes").unwrap();
    src.child("a/b/clip.MP4").write_str("clip").unwrap();
    dst.create_dir_all().unwrap();

    let out = run(
        temp.path(),
        &[os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()],
    );

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());
    assert_eq!(names(dst.path()), ["clip.MP4", "photo.jpg"]);
    assert_eq!(fs::read_to_string(dst.path().join("photo.jpg")).unwrap(), "photo");
    assert!(src.child("a/photo.jpg").path().exists());
    assert!(src.child("a/notes.txt").path().exists());
    assert!(src.child("a/b/clip.MP4").path().exists());
}

#[test]
fn second_run_adds_suffixed_copies() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    let dst = temp.child("dst");
    src.child("photo.jpg").write_str("p").unwrap();
    src.child("sub/clip.MP4").write_str("c").unwrap();
    dst.create_dir_all().unwrap();

    let args = [os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()];
    assert!(run(temp.path(), &args).status.success());
    assert!(run(temp.path(), &args).status.success());

    assert_eq!(names(dst.path()), ["clip-1.mp4", "clip.MP4", "photo-1.jpg", "photo.jpg"]);
}

#[test]
fn remove_flag_moves_files_and_reports_removal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    let dst = temp.child("dst");
    src.child("x/movie.mov").write_str("m").unwrap();
    src.child("x/readme.md").write_str("r").unwrap();
    dst.create_dir_all().unwrap();

    let out = run(
        temp.path(),
        &[os("-r"), os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()],
    );

    assert!(out.status.success());
    assert!(!src.child("x/movie.mov").path().exists());
    assert!(src.child("x/readme.md").path().exists());
    assert!(src.child("x").path().is_dir(), "directories are never removed");
    assert_eq!(names(dst.path()), ["movie.mov"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Removing"), "stderr: {stderr}");
}

#[test]
fn verbose_flag_controls_progress_messages() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    let dst = temp.child("dst");
    src.child("a.png").write_str("a").unwrap();
    dst.create_dir_all().unwrap();
    let base = [os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()];

    let quiet = run(temp.path(), &base);
    let stderr = String::from_utf8_lossy(&quiet.stderr);
    assert!(!stderr.contains("Copying"), "stderr: {stderr}");

    let mut verbose_args = vec![os("-v")];
    verbose_args.extend_from_slice(&base);
    let verbose = run(temp.path(), &verbose_args);
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("Copying"), "stderr: {stderr}");
    assert!(stderr.contains("Done"), "stderr: {stderr}");
    assert!(verbose.stdout.is_empty());
}

#[test]
fn missing_destination_exits_255_without_side_effects() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.child("photo.jpg").write_str("p").unwrap();
    let dst = temp.child("no_such_dir");

    let out = run(
        temp.path(),
        &[os("-r"), os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()],
    );

    assert_eq!(out.status.code(), Some(255));
    assert!(!dst.path().exists());
    assert!(src.child("photo.jpg").path().exists());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn missing_required_flags_print_usage_and_exit_255() {
    let temp = assert_fs::TempDir::new().unwrap();

    let out = run(temp.path(), &[os("-s"), temp.path().as_os_str()]);
    assert_eq!(out.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage:"), "stderr: {stderr}");

    let out = run(temp.path(), &[os("-d"), temp.path().as_os_str()]);
    assert_eq!(out.status.code(), Some(255));

    let out = run(temp.path(), &[os("-s"), os(""), os("-d"), temp.path().as_os_str()]);
    assert_eq!(out.status.code(), Some(255), "empty value counts as missing");
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
    assert!(out.stdout.is_empty());

    let out = run(temp.path(), &[os("-s"), temp.path().as_os_str(), os("-d"), os("")]);
    assert_eq!(out.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
}

#[test]
fn missing_source_aborts_walk_with_status_1() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dst = temp.child("dst");
    dst.create_dir_all().unwrap();
    let src = temp.child("not_here");

    let out = run(
        temp.path(),
        &[os("-s"), src.path().as_os_str(), os("-d"), dst.path().as_os_str()],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(names(dst.path()).is_empty());
}
