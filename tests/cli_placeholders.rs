use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn combined_output(output: &std::process::Output) -> String {
    format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}

#[test]
fn help_lists_flags() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--help")
        .output()
        .expect("--help runs");

    assert!(output.status.success());
    let text = combined_output(&output);
    for flag in ["--root", "--check", "--print-manifest", "--progress"] {
        assert!(text.contains(flag), "help text missing {flag}: {text}");
    }
}

#[test]
fn no_arguments_populates_public_in_working_dir() {
    let tmp = TempDir::new().expect("tempdir");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .current_dir(tmp.path())
        .output()
        .expect("provision runs");

    assert!(output.status.success(), "{}", combined_output(&output));
    let public = tmp.path().join("public");
    assert_eq!(count_files(&public.join("audio")), 26);
    assert_eq!(count_files(&public.join("video")), 8);
    assert_eq!(
        fs::metadata(public.join("audio/morning/gentle-piano.mp3"))
            .expect("placeholder exists")
            .len(),
        0
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Setting up morning..."), "{stdout}");
    assert!(
        stdout.contains("Created: video/mountain/mountain-vista.mp4"),
        "{stdout}"
    );
    assert!(stdout.contains("created=34"), "{stdout}");
}

#[test]
fn rerun_creates_nothing_and_keeps_real_media() {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().join("media");
    let real = root.join("audio/ocean/ocean-waves.mp3");
    fs::create_dir_all(real.parent().expect("parent")).expect("create dir");
    fs::write(&real, b"real ocean audio").expect("write media");

    let first = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--progress")
        .arg("plain")
        .output()
        .expect("first run");
    assert!(first.status.success(), "{}", combined_output(&first));
    let text = combined_output(&first);
    assert!(text.contains("created=33 existing=1"), "{text}");
    assert!(text.contains("[PROGRESS] provision"), "{text}");

    let second = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--progress")
        .arg("quiet")
        .output()
        .expect("second run");
    assert!(second.status.success(), "{}", combined_output(&second));
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("created=0 existing=34"), "{stdout}");
    assert!(!stdout.contains("Created:"), "{stdout}");

    assert_eq!(fs::read(&real).expect("read media"), b"real ocean audio");
}

#[test]
fn check_reports_missing_then_passes() {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().join("public");

    let before = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--check")
        .output()
        .expect("check runs");
    assert!(!before.status.success());
    let text = combined_output(&before);
    assert!(text.contains("missing=34"), "{text}");
    assert!(text.contains("missing: audio/stress/soft-rain.mp3"), "{text}");
    assert!(!root.exists(), "check must not create anything");

    let provision = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--progress")
        .arg("quiet")
        .output()
        .expect("provision runs");
    assert!(provision.status.success(), "{}", combined_output(&provision));

    let after = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--check")
        .output()
        .expect("check runs");
    assert!(after.status.success(), "{}", combined_output(&after));
    assert!(String::from_utf8_lossy(&after.stdout).contains("present=34 / 34"));
}

#[test]
fn blocked_directory_exits_non_zero() {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path().join("public");
    fs::create_dir_all(&root).expect("create root");
    fs::write(root.join("audio"), b"not a directory").expect("write blocker");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--root")
        .arg(&root)
        .arg("--progress")
        .arg("quiet")
        .output()
        .expect("provision runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to create directory"), "{stderr}");
}

#[test]
fn print_manifest_emits_json() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("mindscope-placeholders"))
        .arg("--print-manifest")
        .output()
        .expect("print-manifest runs");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    let categories = json["categories"].as_array().expect("categories array");
    assert_eq!(categories.len(), 8);
    assert_eq!(categories[0]["name"], "morning");
    assert_eq!(categories[7]["name"], "gratitude");
    assert_eq!(categories[7]["video"][0], "golden-light.mp4");
}
