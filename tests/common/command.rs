use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Date used for every commit made through [`twig_commit`] (%Y-%m-%d %H:%M:%S %z)
pub const COMMIT_DATE: &str = "2025-07-01 10:52:37 +0200";

/// How [`COMMIT_DATE`] shows up in `log`
pub const READABLE_COMMIT_DATE: &str = "Tue Jul 1 10:52:37 2025 +0200";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `f.txt` ("1\n") and `a/g.txt` ("g\n") committed on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "1\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("g.txt"),
        "g\n".to_string(),
    ));

    twig_add(repository_dir.path(), "f.txt").assert().success();
    twig_add(repository_dir.path(), "a/g.txt").assert().success();
    twig_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("TWIG_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_add(dir: &Path, file: &str) -> Command {
    run_twig_command(dir, &["add", file])
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", message]);
    cmd.env("TWIG_COMMIT_DATE", COMMIT_DATE);
    cmd
}

pub fn twig_checkout(dir: &Path, branch: &str) -> Command {
    run_twig_command(dir, &["checkout", branch])
}

pub fn twig_merge(dir: &Path, branch: &str) -> Command {
    run_twig_command(dir, &["merge", branch])
}

/// Write `content` to `file`, stage it and commit it
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    twig_add(dir, file).assert().success();
    twig_commit(dir, message).assert().success();
}

/// Stdout of a command that is expected to succeed
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run twig");
    assert!(output.status.success(), "twig failed: {output:?}");

    String::from_utf8(output.stdout).expect("twig output is not UTF-8")
}

/// Id of the head commit, as printed first by `log`
pub fn head_commit_id(dir: &Path) -> String {
    let log = stdout_of(run_twig_command(dir, &["log"]));

    log.lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("log shows no commit")
        .to_string()
}

/// Ids of the commits whose message is exactly `message`
pub fn find_commits(dir: &Path, message: &str) -> Vec<String> {
    stdout_of(run_twig_command(dir, &["find", message]))
        .lines()
        .map(str::to_string)
        .collect()
}

/// Number of entries `log` shows for the current branch
pub fn log_length(dir: &Path) -> usize {
    stdout_of(run_twig_command(dir, &["log"]))
        .lines()
        .filter(|line| *line == "===")
        .count()
}
