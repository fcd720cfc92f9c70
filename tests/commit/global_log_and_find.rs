use crate::common::command::{
    commit_file, find_commits, head_commit_id, init_repository_dir, run_twig_command, stdout_of,
    twig_checkout,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn global_log_shows_commits_of_every_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "f.txt", "master\n", "On master");
    twig_checkout(dir, "other").assert().success();
    commit_file(dir, "f.txt", "other\n", "On other");

    let log = stdout_of(run_twig_command(dir, &["log"]));
    let global_log = stdout_of(run_twig_command(dir, &["global-log"]));

    assert!(!log.contains("On master"));
    for message in ["On master", "On other", "Initial files", "initial commit"] {
        assert!(global_log.contains(&format!("\n{message}\n\n")), "{message} missing");
    }
    assert_eq!(global_log.matches("===\ncommit ").count(), 4);
    // the root commit is the oldest one
    assert!(global_log.ends_with("initial commit\n\n"));
}

#[rstest]
fn find_lists_every_commit_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "2\n", "Same message");
    let first = head_commit_id(dir);
    commit_file(dir, "f.txt", "3\n", "Same message");
    let second = head_commit_id(dir);

    let mut expected = vec![first, second];
    expected.sort();

    assert_eq!(find_commits(dir, "Same message"), expected);
}

#[rstest]
fn find_without_matches_is_reported(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["find", "no such message"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");
}
