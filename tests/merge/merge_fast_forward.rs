use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, log_length, run_twig_command,
    twig_checkout, twig_merge,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_a_descendant_moves_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();
    twig_checkout(dir, "feature").assert().success();
    commit_file(dir, "f.txt", "2\n", "Feature one");
    commit_file(dir, "new.txt", "new\n", "Feature two");
    let feature_head = head_commit_id(dir);
    twig_checkout(dir, "master").assert().success();

    twig_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    // no merge commit: master now shares feature's history
    assert_eq!(head_commit_id(dir), feature_head);
    assert_eq!(log_length(dir), 4);
    assert_eq!(read_file(&dir.join("f.txt")), "2\n");
    assert_eq!(read_file(&dir.join("new.txt")), "new\n");
    twig_checkout(dir, "feature").assert().success();
    assert_eq!(head_commit_id(dir), feature_head);
}
