use crate::common::command::{
    READABLE_COMMIT_DATE, commit_file, find_commits, head_commit_id, init_repository_dir,
    run_twig_command, stdout_of, twig_add, twig_commit,
};
use crate::common::file::{FileSpec, generate_content, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_reports_branch_short_id_and_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("f.txt"), generate_content()));
    twig_add(dir, "f.txt").assert().success();

    let output = stdout_of(twig_commit(dir, "Second commit"));
    let head = head_commit_id(dir);

    assert_eq!(output, format!("[master {}] Second commit\n", &head[..7]));
}

#[rstest]
fn log_follows_first_parents_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "2\n", "Second commit");
    let head = head_commit_id(dir);
    let initial_files = find_commits(dir, "Initial files");
    let root = find_commits(dir, "initial commit");

    let log = stdout_of(run_twig_command(dir, &["log"]));

    assert_eq!(
        log,
        format!(
            "===\ncommit {head}\nDate: {READABLE_COMMIT_DATE}\nSecond commit\n\n\
             ===\ncommit {}\nDate: {READABLE_COMMIT_DATE}\nInitial files\n\n\
             ===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
            initial_files[0], root[0]
        )
    );
}

#[rstest]
fn committed_content_is_restored_byte_for_byte(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let content = generate_content();
    commit_file(dir, "notes/today.txt", &content, "Add notes");
    let commit_id = head_commit_id(dir);
    commit_file(dir, "notes/today.txt", "overwritten\n", "Overwrite notes");

    run_twig_command(dir, &["checkout", &commit_id[..8], "--", "notes/today.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("notes").join("today.txt")), content);
}

#[rstest]
fn commit_ids_do_not_change_as_history_grows(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);

    commit_file(dir, "f.txt", "2\n", "Second commit");
    commit_file(dir, "f.txt", "3\n", "Third commit");

    assert_eq!(find_commits(dir, "Initial files"), vec![first]);
}
