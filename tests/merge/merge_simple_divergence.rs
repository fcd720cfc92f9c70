use crate::common::command::{
    commit_file, find_commits, head_commit_id, init_repository_dir, log_length,
    run_twig_command, stdout_of, twig_checkout, twig_merge,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///
///         I          f.txt, a/g.txt
///        / \
///       M   F        master edits f.txt and removes a/g.txt; feature adds h.txt
///        \ /
///         X          merge commit
#[rstest]
fn non_overlapping_changes_merge_cleanly(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "f.txt", "master\n", "Edit f on master");
    run_twig_command(dir, &["rm", "a/g.txt"]).assert().success();
    run_twig_command(dir, &["commit", "Remove g on master"])
        .assert()
        .success();
    twig_checkout(dir, "feature").assert().success();
    commit_file(dir, "h.txt", "h\n", "Add h on feature");
    twig_checkout(dir, "master").assert().success();
    let master_head = head_commit_id(dir);

    twig_merge(dir, "feature").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("f.txt")), "master\n");
    assert_eq!(read_file(&dir.join("h.txt")), "h\n");
    assert!(!dir.join("a").join("g.txt").exists());

    let merge_id = find_commits(dir, "Merged feature into master.").remove(0);
    assert_eq!(head_commit_id(dir), merge_id);
    // X, M (remove), M (edit), I, root
    assert_eq!(log_length(dir), 5);
    let log = stdout_of(run_twig_command(dir, &["log"]));
    assert!(log.contains(&format!("Merge: {} ", &master_head[..7])));
}

#[rstest]
fn merging_again_after_a_merge_reports_the_ancestor(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "f.txt", "master\n", "Edit f on master");
    twig_checkout(dir, "feature").assert().success();
    commit_file(dir, "h.txt", "h\n", "Add h on feature");
    twig_checkout(dir, "master").assert().success();
    twig_merge(dir, "feature").assert().success();

    twig_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    // the feature branch can now fast-forward to the merge
    twig_checkout(dir, "feature").assert().success();
    twig_merge(dir, "master")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");
    assert_eq!(read_file(&dir.join("f.txt")), "master\n");
}
