use std::path::Path;
use std::process::{Command, Stdio};

/// Environment variable overriding the author date of a commit.
///
/// Accepts the same date formats as `git commit --date`.
pub const GIT_AUTHOR_DATE: &str = "GIT_AUTHOR_DATE";

/// Environment variable overriding the committer date of a commit.
pub const GIT_COMMITTER_DATE: &str = "GIT_COMMITTER_DATE";

/// Runs a git command and returns only its exit status.
///
/// - Returns `Ok(())` if the command exits successfully (status code `0`).
/// - Returns `Err("non-zero exit")` if the command exits with a non-zero status.
/// - Returns `Err` containing the I/O error message if the process fails to start.
fn run_status(mut cmd: Command) -> Result<(), String> {
    let status_res = cmd.status();

    match status_res {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(String::from("non-zero exit"))
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and returns its trimmed standard output on success,
/// or its standard error as an `Err` on failure.
///
/// - If the command exits with a zero status, its `stdout` is captured,
///   converted to UTF-8 (lossy), trimmed, and returned as `Ok(String)`.
/// - If the command exits non-zero, its `stderr` is captured, converted and
///   trimmed the same way, and returned as `Err(String)`.
/// - If the process fails to spawn, the I/O error message is returned as
///   `Err(String)`.
fn run_output(mut cmd: Command) -> Result<String, String> {
    let out_res = cmd.output();
    match out_res {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Returns a `git` command rooted at `repo` via `-C`.
///
/// Every wrapper in this module goes through here so the working tree being
/// painted never depends on the process working directory.
fn git_in(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

/// Runs `git -C <repo> rev-parse <flag>` and returns its output as a trimmed string.
///
/// Used to query repository metadata, e.g. `--show-toplevel` to confirm the
/// target path resolves to a working tree after bootstrap.
///
/// # Parameters
///
/// * `repo` — Path to the working tree.
/// * `flag` — The argument to pass to `git rev-parse`.
///
/// # Returns
///
/// * `Ok(String)` containing the trimmed standard output on success.
/// * `Err(String)` containing the trimmed standard error or an I/O error
///   message if the command failed.
pub fn rev_parse(repo: &Path, flag: &str) -> Result<String, String> {
    let mut cmd = git_in(repo);
    cmd.arg("rev-parse").arg(flag);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Runs `git init --bare <git_dir>`, creating the directory if needed.
///
/// The fresh-repository bootstrap initializes a bare repository at
/// `<path>/.git` and then flips `core.bare` off (see [`config_set`]), which
/// turns `<path>` into a normal working tree.
pub fn init_bare(git_dir: &Path) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.arg("init").arg("--bare").arg(git_dir);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_status(cmd).map_err(|_| format!("`git init --bare {}` failed", git_dir.display()))
}

/// Sets a git configuration key in the repository at `repo`.
///
/// This modifies the repository's **local** `.git/config` file only; global
/// and system-level configuration are untouched.
///
/// # Parameters
///
/// * `repo` — Path to the working tree.
/// * `key` — The configuration key to set (e.g. `"core.bare"`).
/// * `value` — The value to assign.
pub fn config_set(repo: &Path, key: &str, value: &str) -> Result<(), String> {
    let mut cmd = git_in(repo);
    cmd.arg("config").arg(key).arg(value);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_status(cmd)
}

/// Stages a single file, by path relative to the repository root.
pub fn add(repo: &Path, file: &str) -> Result<(), String> {
    let mut cmd = git_in(repo);
    cmd.arg("add").arg("--").arg(file);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_status(cmd).map_err(|_| format!("`git add {}` returned non-zero", file))
}

/// Records one commit dated `stamp` for both the author and the committer.
///
/// Internally this executes:
///
/// ```text
/// GIT_AUTHOR_DATE=<stamp> GIT_COMMITTER_DATE=<stamp> \
///     git commit --allow-empty -m <message>
/// ```
///
/// `--allow-empty` is required: the tracked file's content does not change
/// between stamps, so every commit after the first records an unchanged
/// tree.
///
/// # Parameters
///
/// * `repo` — Path to the working tree.
/// * `message` — Commit message.
/// * `stamp` — Date string in a format git accepts, used for both dates.
///
/// # Returns
///
/// * `Ok(())` if the commit was recorded.
/// * `Err(String)` if git exited with a non-zero status or failed to start.
pub fn commit_at(repo: &Path, message: &str, stamp: &str) -> Result<(), String> {
    let mut cmd = git_in(repo);
    cmd.arg("commit")
        .arg("--allow-empty")
        .arg("-m")
        .arg(message);
    cmd.env(GIT_AUTHOR_DATE, stamp);
    cmd.env(GIT_COMMITTER_DATE, stamp);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_status(cmd).map_err(|_| format!("`git commit` for {} returned non-zero", stamp))
}
