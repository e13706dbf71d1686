use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::Stamp;
use crate::error::Error;
use crate::git;

/// Narrow capability over the version-control backend.
///
/// The painter only ever needs three operations: open-or-create (a
/// constructor on the concrete type), [`stage_and_commit`], and [`close`].
/// Any backend implementing this trait is substitutable; tests use a
/// recording mock.
///
/// [`stage_and_commit`]: Repository::stage_and_commit
/// [`close`]: Repository::close
pub trait Repository {
    /// Stages `file` (relative to the repository root) and records one
    /// commit whose author date and committer date are both `stamp`.
    ///
    /// Appends exactly one commit to the checked-out branch per call. There
    /// is no meaningful partial-success state, so any failure is final.
    fn stage_and_commit(&mut self, file: &str, stamp: &Stamp) -> Result<(), Error>;

    /// Releases the handle. Called once, on the normal exit path only.
    fn close(self) -> Result<(), Error>
    where
        Self: Sized;
}

/// Backend driving the `git` binary against a working tree on disk.
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    /// Opens the repository at `path`, creating one if none exists.
    ///
    /// A fresh repository is bootstrapped bare-first: create the directory
    /// chain, `git init --bare <path>/.git`, then flip `core.bare` off so
    /// `path` becomes a normal working tree. An existing
    /// repository is reused as-is; its history and branch state are
    /// untouched beyond the commits appended later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Repository`] if the directory cannot be created, any
    /// git step fails, or `path` does not resolve to a working tree
    /// afterwards.
    pub fn init_or_open(path: &Path) -> Result<Self, Error> {
        let git_dir = path.join(".git");

        if !git_dir.exists() {
            fs::create_dir_all(path).map_err(|e| {
                Error::Repository(format!("cannot create `{}`: {}", path.display(), e))
            })?;
            git::init_bare(&git_dir).map_err(Error::Repository)?;
            git::config_set(&git_dir, "core.bare", "false").map_err(|e| {
                Error::Repository(format!("cannot convert `{}` to a work tree: {}", path.display(), e))
            })?;
        }

        // Reopen check: the path must resolve to a working tree now.
        match git::rev_parse(path, "--show-toplevel") {
            Ok(_) => Ok(GitRepository {
                workdir: path.to_path_buf(),
            }),
            Err(e) => Err(Error::Repository(format!(
                "`{}` is not a usable repository: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Root of the working tree being painted.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Repository for GitRepository {
    fn stage_and_commit(&mut self, file: &str, stamp: &Stamp) -> Result<(), Error> {
        let date = stamp.to_string();
        git::add(&self.workdir, file).map_err(Error::Repository)?;
        // The stamp doubles as the commit message, one line per graph cell.
        git::commit_at(&self.workdir, &date, &date).map_err(Error::Repository)
    }

    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}
