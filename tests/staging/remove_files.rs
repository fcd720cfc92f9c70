use crate::common::command::{
    init_repository_dir, run_twig_command, stdout_of, twig_add, twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_drops_it_from_the_next_commit(
    init_repository_dir: TempDir,
) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "a/g.txt"]).assert().success().stdout("");

    assert!(!dir.join("a").join("g.txt").exists());
    assert!(!dir.join("a").exists());
    assert!(dir.join("f.txt").exists());
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\na/g.txt\n\n"));

    twig_commit(dir, "remove g").assert().success();

    // the removed file is no longer tracked, the other one still is
    run_twig_command(dir, &["checkout", "--", "a/g.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
    run_twig_command(dir, &["rm", "f.txt"]).assert().success();
    assert!(!dir.join("f.txt").exists());
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    twig_add(dir, "new.txt").assert().success();

    run_twig_command(dir, &["rm", "new.txt"]).assert().success();

    assert!(dir.join("new.txt").exists());
    let status = stdout_of(run_twig_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\nnew.txt\n\n"));
}

#[rstest]
fn removing_an_unknown_file_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("stray.txt"), "stray\n".to_string()));

    run_twig_command(dir, &["rm", "stray.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");

    assert!(dir.join("stray.txt").exists());
}

#[rstest]
fn adding_a_removed_file_back_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "f.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "1\n".to_string()));

    twig_add(dir, "f.txt").assert().success();

    twig_commit(dir, "nothing to do")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}
