use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, run_twig_command, stdout_of, twig_add,
    twig_checkout,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_replaces_the_tracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    twig_checkout(dir, "feature")
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");
    commit_file(dir, "feature.txt", "feature\n", "Add feature file");
    commit_file(dir, "f.txt", "feature version\n", "Change f on feature");
    let feature_head = head_commit_id(dir);

    twig_checkout(dir, "master").assert().success();

    assert!(!dir.join("feature.txt").exists());
    assert_eq!(read_file(&dir.join("f.txt")), "1\n");
    assert_eq!(read_file(&dir.join("a").join("g.txt")), "g\n");

    twig_checkout(dir, "feature").assert().success();

    assert_eq!(read_file(&dir.join("feature.txt")), "feature\n");
    assert_eq!(read_file(&dir.join("f.txt")), "feature version\n");
    assert_eq!(head_commit_id(dir), feature_head);
}

#[rstest]
fn switching_branches_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "staged\n".to_string()));
    twig_add(dir, "f.txt").assert().success();

    twig_checkout(dir, "feature").assert().success();

    let status = stdout_of(run_twig_command(dir, &["status"]));
    assert!(status.starts_with("=== Branches ===\n*feature\nmaster\n\n"));
    assert!(status.contains("=== Staged Files ===\n\n"));
    // both branches point at the same commit, so the working copy is reset to it
    assert_eq!(read_file(&dir.join("f.txt")), "1\n");
}

#[rstest]
#[case::unknown("nope", "No such branch exists.\n")]
#[case::invalid("..bad", "No such branch exists.\n")]
#[case::current("master", "No need to checkout the current branch.\n")]
fn checkout_of_unusable_branches_is_reported(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    twig_checkout(init_repository_dir.path(), branch)
        .assert()
        .success()
        .stdout(message.to_string());
}

#[rstest]
fn checkout_without_arguments_is_a_usage_error(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checkout needs a branch"));
}
