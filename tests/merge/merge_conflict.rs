use crate::common::command::{
    commit_file, head_commit_id, repository_dir, run_twig_command, stdout_of, twig_checkout,
    twig_merge,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///
///       A   f = "1"
///      / \
///     C   B   master: f = "3", feature: f = "2"
#[rstest]
fn divergent_edits_of_one_file_conflict(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    commit_file(dir, "f", "1\n", "Commit A");
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    twig_checkout(dir, "feature").assert().success();
    commit_file(dir, "f", "2\n", "Commit B");
    let feature_head = head_commit_id(dir);
    twig_checkout(dir, "master").assert().success();
    commit_file(dir, "f", "3\n", "Commit C");
    let master_head = head_commit_id(dir);

    twig_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(read_file(&dir.join("f")), "<<<<<<< HEAD\n3\n=======\n2\n>>>>>>>\n");

    let log = stdout_of(run_twig_command(dir, &["log"]));
    let merge_entry = log.split("===\n").nth(1).unwrap();
    assert!(merge_entry.starts_with(&format!("commit {}\n", head_commit_id(dir))));
    assert!(merge_entry.contains(&format!(
        "Merge: {} {}\n",
        &master_head[..7],
        &feature_head[..7]
    )));
    assert!(merge_entry.ends_with("Merged feature into master.\n\n"));

    // the merge commit records the conflicted file, so nothing is left to commit
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\nfeature\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn modified_against_deleted_conflicts_with_an_empty_side(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    commit_file(dir, "f.txt", "base\n", "Base");
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    twig_checkout(dir, "feature").assert().success();
    run_twig_command(dir, &["rm", "f.txt"]).assert().success();
    run_twig_command(dir, &["commit", "Remove f"]).assert().success();
    twig_checkout(dir, "master").assert().success();
    commit_file(dir, "f.txt", "mine\n", "Edit f");

    twig_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nmine\n=======\n>>>>>>>\n"
    );
}
