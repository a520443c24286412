//! # TMSU Command Adapter
//!
//! Wraps invocation of the external `tmsu` executable and turns its textual
//! output into structured results. Every operation is one blocking subprocess
//! call: no retries, no timeouts. tmsu failures here usually mean a missing
//! database or a bad tag name, not a transient condition, so they are surfaced
//! to the caller instead of retried.
//!
//! Arguments are always passed as discrete argv entries via
//! `std::process::Command`. No shell is involved, so paths with spaces and
//! odd characters need no quoting layer.
//!
//! The [`TagStore`] trait is the seam between the tagging logic and the
//! subprocess layer; tests substitute an in-memory implementation.

mod parse;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::{debug, warn};

pub use parse::{parse_file_tags, parse_info, parse_tag_list};

/// Exit code tmsu uses when no database exists for the working directory.
const NO_DATABASE_EXIT: i32 = 1;

/// The `tmsu info` block, read once at startup to verify a database exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub root: String,
    pub size: String,
    pub database: String,
}

/// Errors from running tmsu or interpreting its output.
#[derive(Debug)]
pub enum TmsuError {
    /// The subprocess could not be spawned or its output not read.
    Io(std::io::Error),
    /// tmsu exited non-zero in a context where that is not an expected answer.
    Exit { code: Option<i32>, stderr: String },
    /// tmsu ran fine but printed something we could not interpret.
    Parse(String),
}

impl fmt::Display for TmsuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TmsuError::Io(e) => write!(f, "failed to run tmsu: {e}"),
            TmsuError::Exit { code: Some(c), stderr } => {
                write!(f, "tmsu exited with code {c}: {}", stderr.trim())
            }
            TmsuError::Exit { code: None, stderr } => {
                write!(f, "tmsu terminated by signal: {}", stderr.trim())
            }
            TmsuError::Parse(msg) => write!(f, "unexpected tmsu output: {msg}"),
        }
    }
}

impl std::error::Error for TmsuError {}

/// Read/write operations against the external tag store.
///
/// `apply` and `remove` report failure as `false` rather than an error: the
/// row they belong to is left unchanged and the user decides whether to retry.
pub trait TagStore {
    /// Database info for the current working directory, `None` if no database
    /// exists there.
    fn info(&self) -> Result<Option<DatabaseInfo>, TmsuError>;

    /// Every tag name known to the database, one per line of `tmsu tags`.
    fn all_tags(&self) -> Result<Vec<String>, TmsuError>;

    /// `(name, value)` pairs for one file; `value` is empty for valueless tags.
    fn file_tags(&self, path: &Path) -> Result<Vec<(String, String)>, TmsuError>;

    /// Apply `tag` to `path`. True iff tmsu exited 0.
    fn apply(&self, path: &Path, tag: &str) -> bool;

    /// Remove `tag` (with `value` when the row carries one) from `path`.
    fn remove(&self, path: &Path, tag: &str, value: Option<&str>) -> bool;
}

/// The production [`TagStore`]: shells out to a located tmsu binary.
pub struct Tmsu {
    program: PathBuf,
}

impl Tmsu {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Search `PATH` for a `tmsu` executable.
    pub fn locate() -> Option<Self> {
        let raw = std::env::var_os("PATH")?;
        std::env::split_paths(&raw)
            .map(|dir| dir.join("tmsu"))
            .find(|candidate| candidate.is_file())
            .map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, args: &[&std::ffi::OsStr]) -> Result<Output, TmsuError> {
        debug!("running {} {:?}", self.program.display(), args);
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(TmsuError::Io)
    }

    fn run_str(&self, args: &[&str]) -> Result<Output, TmsuError> {
        let args: Vec<&std::ffi::OsStr> = args.iter().map(|a| a.as_ref()).collect();
        self.run(&args)
    }

    /// Run a mutating command where only the exit status matters.
    fn run_status(&self, args: &[&std::ffi::OsStr]) -> bool {
        match self.run(args) {
            Ok(out) if out.status.success() => true,
            Ok(out) => {
                warn!(
                    "tmsu {:?} failed ({}): {}",
                    args.first(),
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                false
            }
            Err(e) => {
                warn!("tmsu {:?} failed: {}", args.first(), e);
                false
            }
        }
    }
}

impl TagStore for Tmsu {
    fn info(&self) -> Result<Option<DatabaseInfo>, TmsuError> {
        let out = self.run_str(&["info"])?;
        if !out.status.success() {
            if out.status.code() == Some(NO_DATABASE_EXIT) {
                return Ok(None);
            }
            return Err(TmsuError::Exit {
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        parse_info(&String::from_utf8_lossy(&out.stdout)).map(Some)
    }

    fn all_tags(&self) -> Result<Vec<String>, TmsuError> {
        let out = self.run_str(&["tags"])?;
        if !out.status.success() {
            return Err(TmsuError::Exit {
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(parse_tag_list(&String::from_utf8_lossy(&out.stdout)))
    }

    fn file_tags(&self, path: &Path) -> Result<Vec<(String, String)>, TmsuError> {
        // tmsu formats `tags` differently when talking to a terminal than to a
        // pipe; `-n` forces the script-friendly one-line form either way.
        let out = self.run(&["tags".as_ref(), "-n".as_ref(), path.as_os_str()])?;
        if !out.status.success() {
            return Err(TmsuError::Exit {
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        parse_file_tags(&String::from_utf8_lossy(&out.stdout), path)
    }

    fn apply(&self, path: &Path, tag: &str) -> bool {
        self.run_status(&["tag".as_ref(), path.as_os_str(), tag.as_ref()])
    }

    fn remove(&self, path: &Path, tag: &str, value: Option<&str>) -> bool {
        let arg = match value {
            Some(v) if !v.is_empty() => format!("{tag}={v}"),
            _ => tag.to_string(),
        };
        self.run_status(&["untag".as_ref(), path.as_os_str(), arg.as_ref()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_covers_variants() {
        let io = TmsuError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.to_string().contains("failed to run tmsu"));

        let exit = TmsuError::Exit {
            code: Some(2),
            stderr: "bad flag\n".to_string(),
        };
        assert_eq!(exit.to_string(), "tmsu exited with code 2: bad flag");

        let parse = TmsuError::Parse("missing key".to_string());
        assert!(parse.to_string().contains("missing key"));
    }

    #[test]
    fn locate_returns_none_without_path() {
        // Only checks the empty-PATH edge; the found case is covered by the
        // fake-binary integration tests.
        let saved = std::env::var_os("PATH");
        unsafe { std::env::remove_var("PATH") };
        assert!(Tmsu::locate().is_none());
        if let Some(p) = saved {
            unsafe { std::env::set_var("PATH", p) };
        }
    }
}
