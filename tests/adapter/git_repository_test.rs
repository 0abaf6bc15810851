//! Tests for the git-backed content source and change sets

use std::fs;

use checkmeta::adapters::git::{GitRepository, Selection};
use checkmeta::core::ports::{ContentError, ContentSource, VersionControl};
use tempfile::TempDir;

use crate::{git, init_git_repo};

fn repo_with_history() -> TempDir {
    let temp = TempDir::new().unwrap();
    let path = temp.path();
    init_git_repo(path);

    fs::write(path.join("a.txt"), "first\n").unwrap();
    fs::write(path.join("gone.txt"), "bye\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-q", "-m", "first"]);
    git(path, &["tag", "base"]);

    fs::write(path.join("a.txt"), "second\n").unwrap();
    fs::create_dir_all(path.join("src")).unwrap();
    fs::write(path.join("src/b.c"), "int b;\n").unwrap();
    git(path, &["rm", "-q", "gone.txt"]);
    git(path, &["add", "."]);
    temp
}

#[test]
fn staged_files_exclude_deletions() {
    let temp = repo_with_history();
    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Staged);

    let mut changed = repo.changed_files().unwrap();
    changed.sort();
    assert_eq!(changed, vec!["a.txt", "src/b.c"]);
}

#[test]
fn content_comes_from_the_index() {
    let temp = repo_with_history();
    // Worktree edit after staging must not be seen
    fs::write(temp.path().join("a.txt"), "unstaged\n").unwrap();

    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Staged);
    assert_eq!(repo.read("a.txt").unwrap(), b"second\n");
    assert!(matches!(repo.read("missing.txt"), Err(ContentError::NotFound(_))));
}

#[test]
fn range_reads_from_tip() {
    let temp = repo_with_history();
    git(temp.path(), &["commit", "-q", "-m", "second"]);
    fs::write(temp.path().join("a.txt"), "third\n").unwrap();
    git(temp.path(), &["add", "."]);

    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Range("base..HEAD".into()));
    let mut changed = repo.changed_files().unwrap();
    changed.sort();
    assert_eq!(changed, vec!["a.txt", "src/b.c"]);
    assert_eq!(repo.read("a.txt").unwrap(), b"second\n");
    assert!(matches!(repo.read("gone.txt"), Err(ContentError::NotFound(_))));
}

#[test]
fn tracked_files_list_the_snapshot() {
    let temp = repo_with_history();
    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Tracked);
    let mut tracked = repo.tracked_files().unwrap();
    tracked.sort();
    assert_eq!(tracked, vec!["a.txt", "src/b.c"]);
    assert_eq!(repo.changed_files().unwrap().len(), 2);
}

#[test]
fn hooks_dir_is_inside_git_dir() {
    let temp = repo_with_history();
    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Staged);
    let hooks = repo.hooks_dir().unwrap();
    assert!(hooks.ends_with(".git/hooks"), "{}", hooks.display());
}

#[test]
fn repo_root_outside_repository_fails() {
    let temp = TempDir::new().unwrap();
    let repo = GitRepository::new(temp.path().to_path_buf(), Selection::Staged);
    assert!(repo.repo_root().is_err());
}

mod discover {
    use super::*;
    use serial_test::serial;

    struct RestoreCwd(std::path::PathBuf);

    impl Drop for RestoreCwd {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    #[test]
    #[serial(cwd)]
    fn roots_at_toplevel_from_subdirectory() {
        let temp = repo_with_history();
        let _restore = RestoreCwd(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp.path().join("src")).unwrap();

        let repo = GitRepository::discover(Selection::Staged).unwrap();
        assert_eq!(
            repo.workdir().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
        assert_eq!(repo.read("src/b.c").unwrap(), b"int b;\n");
        assert_eq!(repo.repo_path("b.c"), "src/b.c");
        assert_eq!(repo.repo_path("../a.txt"), "a.txt");
    }

    #[test]
    #[serial(cwd)]
    fn fails_outside_repository() {
        let temp = TempDir::new().unwrap();
        let _restore = RestoreCwd(std::env::current_dir().unwrap());
        std::env::set_current_dir(temp.path()).unwrap();

        assert!(GitRepository::discover(Selection::Tracked).is_err());
    }
}
