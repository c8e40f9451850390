use assert_cmd::{crate_name, Command};
use assertables::assert_contains;
use std::fs;
use std::io::Write;
use svgtess::cli::Config;
use tempfile::NamedTempFile;

#[test]
fn test_cmdline_help() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = String::from_utf8(cmd.arg("-h").assert().success().get_output().stdout.clone())
        .expect("non-UTF8");
    assert_contains!(output, "Usage");
    assert_contains!(output, "--arc-mode");
}

#[test]
fn test_cmdline_bad_args() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.args(["--samples", "lots"]).assert().failure().code(2);
}

#[test]
fn test_cmdline_path_data_stdin() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = cmd
        .args(["-d", "--samples", "4"])
        .write_stdin("M0 0 Q5 5 10 0")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).expect("non-UTF8");
    assert_contains!(output, "#0: 2 commands, 4 vertices, 6 indices, 1 segments");
    assert_contains!(output, "d=\"M 0,0 Q 5,5 10,0\"");
}

#[test]
fn test_cmdline_invalid_path() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = cmd
        .arg("-d")
        .write_stdin("M 0,0 L 5,5 K")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let output = String::from_utf8(output).expect("non-UTF8");
    assert_contains!(output, "Unknown path command 'K' at offset 12");
}

#[test]
fn test_cmdline_config() {
    let config = Config::from_cmdline(&format!("{} --help", crate_name!()));
    assert!(config.is_err());

    let mut tmpfile = NamedTempFile::new().expect("could not create tmpfile");
    write!(
        tmpfile,
        r#"<svg><path id="p" d="M0 0 L 10 10"/><path d="M 0 0 A 1 1 0 0 1 2 0"/></svg>"#
    )
    .expect("tmpfile write failed");
    let outfile = NamedTempFile::new().expect("could not create outfile");
    let config = Config::from_cmdline(&format!(
        "{} -f svg {} -o {}",
        crate_name!(),
        tmpfile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap()
    ))
    .expect("cmdline should be valid");
    svgtess::cli::run(config).expect("run failed");
    let output = fs::read_to_string(outfile.path()).expect("output readable");
    assert_contains!(output, r#"<path id="p" d="M 0,0 L 10,10"/>"#);

    // same input, but strict mode rejects the arc
    let config = Config::from_cmdline(&format!(
        "{} --strict {}",
        crate_name!(),
        tmpfile.path().to_str().unwrap(),
    ))
    .expect("cmdline should be valid");
    assert!(svgtess::cli::run(config).is_err());

    // input and output may not be the same file
    let path = tmpfile.path().to_str().unwrap();
    assert!(Config::from_cmdline(&format!("{} {path} -o {path}", crate_name!())).is_err());
}
