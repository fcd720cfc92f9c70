use crate::common::command::{init_repository_dir, run_twig_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_in_an_existing_repository_changes_nothing(init_repository_dir: TempDir) {
    let log_before = stdout_of(run_twig_command(init_repository_dir.path(), &["log"]));

    run_twig_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("A Twig version-control system already exists in the current directory.\n");

    let log_after = stdout_of(run_twig_command(init_repository_dir.path(), &["log"]));
    assert_eq!(log_before, log_after);
}
