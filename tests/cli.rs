//! Binary-level tests for the `modroots` CLI.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use clap::Parser;
use modroots::cli::{Cli, Commands, OutputFormat};
use predicates::prelude::*;

mod util;
use util::{make_project_fixture, put};

fn modroots() -> Command
{
    let mut cmd = Command::cargo_bin("modroots").expect("bin");
    cmd.env_remove("MODROOTS_LOG");
    cmd
}

#[test]
fn find_flag_parsing()
{
    let cmd = Cli::parse_from([
        "modroots",
        "find",
        "src",
        "-e",
        "/gen/",
        "--exclude",
        "vendor",
        "--ext",
        "pyi",
        "--format",
        "json",
        "-vv",
    ]);

    assert_eq!(cmd.verbose, 2);
    match cmd.command
    {
        Commands::Find(args) =>
        {
            assert_eq!(args.path, std::path::PathBuf::from("src"));
            assert_eq!(args.exclude, vec!["/gen/".to_string(), "vendor".to_string()]);
            assert_eq!(args.extensions, vec!["pyi".to_string()]);
            assert_eq!(args.format, OutputFormat::Json);
            assert!(!args.no_default_excludes);
        }
        _ => panic!("expected Find command"),
    }
}

#[test]
fn find_prints_import_names()
{
    let tmp = make_project_fixture();

    modroots()
        .current_dir(tmp.path())
        .args(["--no-color", "find", "."])
        .assert()
        .success()
        .stdout("acme.gadgets\nacme.widgets\nsetup\ntool\n")
        .stderr(predicate::str::contains("4 root(s)"));
}

#[test]
fn find_json_records()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    put(&tmp, "ns/sub/__init__.py", "");

    let out = modroots()
        .current_dir(tmp.path())
        .args(["--quiet", "find", ".", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v[0]["name"], "ns.sub");
    assert_eq!(v[0]["kind"], "package");
    assert_eq!(v[0]["search_dir"], ".");
    assert_eq!(v[0]["rel_path"], "ns/sub");
}

#[test]
fn find_respects_config_file_and_cli_excludes()
{
    let tmp = make_project_fixture();
    tmp.child("modroots.toml")
        .write_str("extend_exclude = [\"/acme/\"]\n")
        .unwrap();

    modroots()
        .current_dir(tmp.path())
        .args(["--no-color", "--quiet", "find", ".", "-e", "setup.py"])
        .assert()
        .success()
        .stdout("tool\n");
}

#[test]
fn find_missing_dir_is_empty()
{
    let tmp = assert_fs::TempDir::new().unwrap();

    modroots()
        .current_dir(tmp.path())
        .args(["--quiet", "find", "does-not-exist"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn find_on_file_fails()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    put(&tmp, "mod.py", "");

    modroots()
        .current_dir(tmp.path())
        .args(["--no-color", "find", "mod.py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be a directory"));
}

#[test]
fn find_bad_pattern_fails()
{
    let tmp = assert_fs::TempDir::new().unwrap();

    modroots()
        .current_dir(tmp.path())
        .args(["--no-color", "find", ".", "-e", "///"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must provide pattern with terms"));
}

#[test]
fn match_reports_each_path()
{
    modroots()
        .args(["--no-color", "match", "test/**/c", "test/a/b/c/d", "a/test/c"])
        .assert()
        .success()
        .stdout("match\ttest/a/b/c/d\nno match\ta/test/c\n");
}

#[test]
fn match_exit_code_without_hits()
{
    modroots()
        .args(["--quiet", "match", "/test", "a/test/b"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn match_dir_only_uses_base()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    put(&tmp, "test/file", "");

    let base = tmp
        .path()
        .to_str()
        .unwrap();

    modroots()
        .args(["--no-color", "match", "test/file/", "test/file", "--base", base])
        .assert()
        .code(1);

    modroots()
        .args(["--no-color", "match", "/test/", "test/file", "--base", base])
        .assert()
        .success();
}

#[test]
fn match_rejects_absolute_path()
{
    modroots()
        .args(["match", "test", "/a/b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("only matches relative paths"));
}

#[test]
fn init_then_refuse_overwrite()
{
    let tmp = assert_fs::TempDir::new().unwrap();

    modroots()
        .args(["init"])
        .arg(tmp.path())
        .assert()
        .success();

    tmp.child("modroots.toml")
        .assert(predicate::str::contains("__pycache__/"));

    modroots()
        .args(["init"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn completions_to_stdout()
{
    modroots()
        .args(["completions", "bash", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modroots"));
}

#[test]
fn completions_need_a_destination()
{
    modroots()
        .args(["completions", "zsh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--out-dir is required"));

    let tmp = assert_fs::TempDir::new().unwrap();
    modroots()
        .args(["completions", "zsh", "--out-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote zsh completion"));
    tmp.child("_modroots")
        .assert(predicate::path::exists());
}
