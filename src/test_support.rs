use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub(crate) fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(path)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run git without asserting success, for commands that legitimately exit
/// non-zero (e.g. a merge stopping on conflicts).
pub(crate) fn git_allow_fail(path: &Path, args: &[&str]) {
    let _ = Command::new("git").current_dir(path).args(args).output();
}

pub(crate) fn write_lines(path: &Path, file: &str, lines: &[&str]) {
    let mut text = lines.join("\n");
    text.push('\n');
    std::fs::write(path.join(file), text).unwrap();
}

fn init_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments; sets HEAD to an
    // unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["commit", "--allow-empty", "-m", "Initial commit"]);

    temp_dir
}

/// Build the branch graph the diff scenarios exercise:
///
/// - `base`: lines.txt = a,b,c,d,e,B,E
/// - `orphan`: a parentless history
/// - `lines2`: adds lines2.txt, removes lines.txt
/// - `less_c`: base without `c`
/// - `less_c_d`: less_c without `d`
/// - `less_a`: base without `a` (gains `A`)
/// - `merge_c_d_to_a`: less_c_d merged into less_a, checked out, with an
///   uncommitted `X` appended to lines.txt
pub(crate) fn lines_repo() -> TempDir {
    let temp_dir = init_repo();
    let path = temp_dir.path();

    git(path, &["checkout", "-b", "base"]);
    write_lines(path, "lines.txt", &["a", "b", "c", "d", "e", "B", "E"]);
    git(path, &["add", "lines.txt"]);
    git(path, &["commit", "-m", "Add lines.txt"]);

    git(path, &["checkout", "--orphan", "orphan"]);
    git(path, &["commit", "-m", "Orphaned commit"]);

    git(path, &["checkout", "-b", "lines2", "base"]);
    write_lines(path, "lines2.txt", &["1", "2"]);
    git(path, &["add", "lines2.txt"]);
    git(path, &["rm", "-q", "lines.txt"]);
    git(path, &["commit", "-m", "Add lines2.txt, remove lines.txt"]);

    git(path, &["checkout", "-b", "less_c", "base"]);
    write_lines(path, "lines.txt", &["a", "b", "d", "e", "B", "C", "E"]);
    git(path, &["add", "lines.txt"]);
    git(path, &["commit", "-m", "Remove 'c' from lines.txt"]);

    git(path, &["checkout", "-b", "less_c_d", "less_c"]);
    write_lines(path, "lines.txt", &["a", "b", "e", "B", "C", "D", "E"]);
    git(path, &["add", "lines.txt"]);
    git(path, &["commit", "-m", "Remove 'd' from lines.txt"]);

    git(path, &["checkout", "-b", "less_a", "base"]);
    write_lines(path, "lines.txt", &["b", "c", "d", "e", "A", "B", "E"]);
    git(path, &["add", "lines.txt"]);
    git(path, &["commit", "-m", "Remove 'a' from lines.txt"]);

    git(path, &["checkout", "-b", "merge_c_d_to_a", "less_a"]);
    // Conflicts (if any) are resolved by writing the merged content and
    // committing with MERGE_HEAD still set, producing a two-parent commit.
    git_allow_fail(path, &["merge", "--no-commit", "--no-ff", "less_c_d"]);
    write_lines(path, "lines.txt", &["b", "e", "A", "B", "C", "D", "E"]);
    git(path, &["add", "lines.txt"]);
    git(path, &["commit", "-m", "Merge branch 'less_c_d' into merge_c_d_to_a"]);

    // Uncommitted working tree edit on top of the merge.
    write_lines(path, "lines.txt", &["b", "e", "A", "B", "C", "D", "E", "X"]);

    temp_dir
}

pub(crate) const DEPS_BASE: &str = "\
dependencies:
  alpha:
    apt: [libalpha-dev]
  beta:
    apt: [libbeta-dev]
";

pub(crate) const DEPS_WITH_GAMMA: &str = "\
dependencies:
  alpha:
    apt: [libalpha-dev]
  beta:
    apt: [libbeta-dev]
  gamma:
    apt: [libgamma-dev]
";

/// Build a repository with a YAML file evolving across branches:
///
/// - `main`: deps.yaml with alpha and beta entries
/// - `add-gamma`: deps.yaml gains a gamma entry (lines 6-7)
/// - `broken`: deps.yaml replaced with malformed YAML
pub(crate) fn deps_repo() -> TempDir {
    let temp_dir = init_repo();
    let path = temp_dir.path();

    std::fs::write(path.join("deps.yaml"), DEPS_BASE).unwrap();
    git(path, &["add", "deps.yaml"]);
    git(path, &["commit", "-m", "Add deps.yaml"]);

    git(path, &["checkout", "-b", "add-gamma", "main"]);
    std::fs::write(path.join("deps.yaml"), DEPS_WITH_GAMMA).unwrap();
    git(path, &["add", "deps.yaml"]);
    git(path, &["commit", "-m", "Add gamma dependency"]);

    git(path, &["checkout", "-b", "broken", "main"]);
    std::fs::write(path.join("deps.yaml"), "dependencies: [unclosed\n").unwrap();
    git(path, &["add", "deps.yaml"]);
    git(path, &["commit", "-m", "Break deps.yaml"]);

    git(path, &["checkout", "main"]);

    temp_dir
}
