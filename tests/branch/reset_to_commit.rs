use crate::common::command::{
    commit_file, find_commits, head_commit_id, init_repository_dir, log_length,
    run_twig_command, stdout_of, twig_add, twig_checkout,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_the_current_branch_and_restores_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_file(dir, "f.txt", "2\n", "Second commit");
    commit_file(dir, "extra.txt", "extra\n", "Third commit");
    write_file(FileSpec::new(dir.join("staged.txt"), "s\n".to_string()));
    twig_add(dir, "staged.txt").assert().success();

    run_twig_command(dir, &["reset", &first[..10]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(head_commit_id(dir), first);
    assert_eq!(log_length(dir), 2);
    assert_eq!(read_file(&dir.join("f.txt")), "1\n");
    assert!(!dir.join("extra.txt").exists());
    // staged files are dropped from staging but stay in the working directory
    let status = stdout_of(run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nstaged.txt\n\n"));
}

#[rstest]
fn reset_restores_the_branch_tips_recorded_by_the_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "f.txt", "2\n", "Second commit");
    let target = head_commit_id(dir);
    let initial_files = find_commits(dir, "Initial files").remove(0);

    // move other ahead, then reset master to a commit made while other was behind
    twig_checkout(dir, "other").assert().success();
    commit_file(dir, "o.txt", "o\n", "Other commit");
    twig_checkout(dir, "master").assert().success();
    commit_file(dir, "f.txt", "3\n", "Third commit");

    run_twig_command(dir, &["reset", &target]).assert().success();

    assert_eq!(head_commit_id(dir), target);
    twig_checkout(dir, "other").assert().success();
    assert_eq!(head_commit_id(dir), initial_files);
    assert!(!dir.join("o.txt").exists());
}

#[rstest]
fn reset_to_an_unknown_commit_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_twig_command(dir, &["reset", "0123456789abcdef"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");

    assert_eq!(head_commit_id(dir), head);
}
