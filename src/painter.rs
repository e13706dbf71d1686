use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::calendar::{self, first_sunday};
use crate::error::Error;
use crate::naming::FileNamer;
use crate::patterns::{GlyphPattern, Patterns};
use crate::repo::Repository;

/// Drives one paint run: expands glyphs into stamps and records one commit
/// per stamp against the backing repository.
///
/// Strictly sequential; each commit depends on the history created before
/// it. Callers must not run two painters against the same repository path
/// concurrently.
pub struct Painter<'a, R: Repository> {
    patterns: &'a Patterns,
    repo: R,
    workdir: PathBuf,
    file: String,
}

impl<'a, R: Repository> Painter<'a, R> {
    /// Creates a painter over `repo`, resolving the target file name.
    ///
    /// With `file` set, the given name is used as-is. Otherwise a name is
    /// drawn from `namer`, and an existing file of that name is a fatal
    /// [`Error::NamingCollision`] — the tool refuses to silently overwrite.
    pub fn new<N: FileNamer>(
        patterns: &'a Patterns,
        repo: R,
        workdir: &Path,
        file: Option<String>,
        namer: &mut N,
    ) -> Result<Self, Error> {
        let file = match file {
            Some(name) => name,
            None => {
                let name = namer.next_name();
                if workdir.join(&name).exists() {
                    return Err(Error::NamingCollision(workdir.join(&name)));
                }
                name
            }
        };

        Ok(Painter {
            patterns,
            repo,
            workdir: workdir.to_path_buf(),
            file,
        })
    }

    /// Name of the tracked file, relative to the repository root.
    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// Paints one character with its grid laid out from `anchor`.
    ///
    /// Returns the number of commits recorded. The pattern lookup happens
    /// before any commit, so an unknown character aborts with nothing
    /// written for it.
    pub fn write_character_at(&mut self, character: char, anchor: NaiveDate) -> Result<usize, Error> {
        let pattern = self.patterns.lookup(character)?;
        self.paint_glyph(pattern, anchor)
    }

    /// Paints one character anchored at the first Sunday of `month`/`year`.
    pub fn write_character(&mut self, character: char, month: u32, year: i32) -> Result<usize, Error> {
        let anchor = first_sunday(month, year)?;
        self.write_character_at(character, anchor)
    }

    /// Paints a whole sentence left-to-right, starting at the first Sunday
    /// of `month`/`year`.
    ///
    /// After each glyph the anchor advances `7 × (weeks + 1)` days, leaving
    /// one blank week-column between glyphs. A character without a pattern
    /// aborts the run; commits already recorded for earlier characters
    /// remain in history.
    pub fn write_sentence(&mut self, sentence: &str, month: u32, year: i32) -> Result<usize, Error> {
        let mut anchor = first_sunday(month, year)?;
        let mut total = 0;

        for character in sentence.chars() {
            let pattern = self.patterns.lookup(character)?;
            total += self.paint_glyph(pattern, anchor)?;
            anchor = calendar::advance_past(anchor, pattern);
        }

        Ok(total)
    }

    /// Closes the repository handle.
    pub fn finish(self) -> Result<(), Error> {
        self.repo.close()
    }

    fn paint_glyph(&mut self, pattern: &GlyphPattern, anchor: NaiveDate) -> Result<usize, Error> {
        let stamps = calendar::expand(anchor, pattern);

        // Recreate the target file empty; only its presence matters.
        File::create(self.workdir.join(&self.file)).map_err(|e| {
            Error::Repository(format!("cannot write target file `{}`: {}", self.file, e))
        })?;

        for stamp in &stamps {
            self.repo.stage_and_commit(&self.file, stamp)?;
        }

        Ok(stamps.len())
    }
}

/// Counts the commits a sentence would produce, without touching the
/// repository.
///
/// # Errors
///
/// Fails with the same [`Error::Configuration`] as painting would if any
/// character has no pattern.
pub fn planned_commits(patterns: &Patterns, sentence: &str) -> Result<usize, Error> {
    let mut total = 0;
    for character in sentence.chars() {
        let pattern = patterns.lookup(character)?;
        total += pattern
            .rows()
            .iter()
            .map(|row| row.iter().filter(|on| **on).count())
            .sum::<usize>();
    }
    Ok(total)
}
