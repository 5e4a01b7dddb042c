// src/interpreter.rs

//! Interpreter resolution.
//!
//! An interpreter is either an explicit path (anything containing a path
//! separator) that is checked with a plain existence test, or a bare program
//! name looked up on `PATH`. The platform default is a `PATH` search with a
//! few well-known install locations as fallback.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;

/// Environment variable overriding the configured interpreter.
pub const INTERPRETER_ENV_VAR: &str = "IPMON_PYTHON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterSpec {
    /// Explicit location; must exist as a file.
    Path(PathBuf),
    /// Program names tried in order on `PATH`, then fixed fallback files.
    Search {
        names: Vec<String>,
        fallbacks: Vec<PathBuf>,
    },
}

impl InterpreterSpec {
    /// Interpret a user-supplied value (flag, env var or config entry).
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.contains('/') || value.contains('\\') {
            InterpreterSpec::Path(PathBuf::from(value))
        } else {
            InterpreterSpec::Search {
                names: vec![value.to_string()],
                fallbacks: Vec::new(),
            }
        }
    }

    pub fn platform_default() -> Self {
        if cfg!(windows) {
            InterpreterSpec::Search {
                names: vec!["python".to_string(), "py".to_string()],
                fallbacks: [
                    "C:\\Python313\\python.exe",
                    "C:\\Python312\\python.exe",
                    "C:\\Python311\\python.exe",
                    "C:\\Python310\\python.exe",
                    "C:\\Python39\\python.exe",
                ]
                .iter()
                .map(PathBuf::from)
                .collect(),
            }
        } else {
            InterpreterSpec::Search {
                names: vec!["python3".to_string(), "python".to_string()],
                fallbacks: ["/usr/local/bin/python3", "/usr/bin/python3"]
                    .iter()
                    .map(PathBuf::from)
                    .collect(),
            }
        }
    }

    /// Anchor a relative explicit path at `base`, so the existence check and
    /// the spawn agree even when the child runs in another directory.
    /// Searched names are left alone.
    pub fn anchored_at(self, base: &Path) -> Self {
        match self {
            InterpreterSpec::Path(path) if path.is_relative() => {
                InterpreterSpec::Path(join_lexically(base, &path))
            }
            other => other,
        }
    }

    /// What to name in the "not found" message.
    pub fn configured_path(&self) -> PathBuf {
        match self {
            InterpreterSpec::Path(path) => path.clone(),
            InterpreterSpec::Search { names, .. } => names
                .first()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    /// Resolve to an existing interpreter file.
    ///
    /// Never executes anything: explicit paths get an existence test, names
    /// go through `search`.
    pub fn locate(&self, fs: &dyn FileSystem, search: &dyn PathSearch) -> Result<PathBuf> {
        match self {
            InterpreterSpec::Path(path) => {
                if fs.is_file(path) {
                    Ok(path.clone())
                } else {
                    Err(LauncherError::InterpreterNotFound { path: path.clone() })
                }
            }
            InterpreterSpec::Search { names, fallbacks } => {
                for name in names {
                    if let Some(found) = search.find(name) {
                        debug!(program = %name, found = %found.display(), "interpreter found on PATH");
                        return Ok(found);
                    }
                }
                for candidate in fallbacks {
                    if fs.is_file(candidate) {
                        debug!(found = %candidate.display(), "interpreter found at fallback location");
                        return Ok(candidate.clone());
                    }
                }
                Err(LauncherError::InterpreterNotFound {
                    path: self.configured_path(),
                })
            }
        }
    }
}

/// `base.join(rel)` without the `.` components.
pub(crate) fn join_lexically(base: &Path, rel: &Path) -> PathBuf {
    base.join(rel)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl fmt::Display for InterpreterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterSpec::Path(path) => write!(f, "{}", path.display()),
            InterpreterSpec::Search { names, .. } => write!(f, "PATH search for {}", names.join(", ")),
        }
    }
}

/// Lookup of a bare program name.
pub trait PathSearch: Send + Sync {
    fn find(&self, program: &str) -> Option<PathBuf>;
}

/// `PATH` lookup through the `which` crate (honours `PATHEXT` on Windows).
#[derive(Debug, Clone, Default)]
pub struct WhichSearch;

impl PathSearch for WhichSearch {
    fn find(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Search a fixed list of directories through a [`FileSystem`].
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct DirListSearch<'a> {
    fs: &'a dyn FileSystem,
    dirs: Vec<PathBuf>,
}

#[cfg(test)]
impl<'a> DirListSearch<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, dirs: impl IntoIterator<Item = impl AsRef<Path>>) -> Self {
        Self {
            fs,
            dirs: dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect(),
        }
    }
}

#[cfg(test)]
impl PathSearch for DirListSearch<'_> {
    fn find(&self, program: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(program))
            .find(|candidate| self.fs.is_file(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn values_with_separators_are_paths() {
        assert_eq!(
            InterpreterSpec::parse("C:\\Python39\\python.exe"),
            InterpreterSpec::Path(PathBuf::from("C:\\Python39\\python.exe"))
        );
        assert_eq!(
            InterpreterSpec::parse(" ./venv/bin/python "),
            InterpreterSpec::Path(PathBuf::from("./venv/bin/python"))
        );
        assert!(matches!(
            InterpreterSpec::parse("python3.12"),
            InterpreterSpec::Search { ref names, .. } if names == &["python3.12".to_string()]
        ));
    }

    #[test]
    fn explicit_path_uses_existence_test() {
        let fs = MockFileSystem::new();
        fs.add_file("/opt/py/bin/python3", b"");
        let search = DirListSearch::new(&fs, Vec::<PathBuf>::new());

        let found = InterpreterSpec::Path("/opt/py/bin/python3".into())
            .locate(&fs, &search)
            .unwrap();
        assert_eq!(found, PathBuf::from("/opt/py/bin/python3"));

        let err = InterpreterSpec::Path("/opt/py/bin/python2".into())
            .locate(&fs, &search)
            .unwrap_err();
        assert!(
            matches!(err, LauncherError::InterpreterNotFound { ref path } if path == Path::new("/opt/py/bin/python2"))
        );
    }

    #[test]
    fn relative_path_is_anchored_at_base() {
        let spec = InterpreterSpec::parse("./bin/py").anchored_at(Path::new("/home/me"));
        assert_eq!(spec, InterpreterSpec::Path(PathBuf::from("/home/me/bin/py")));

        let absolute = InterpreterSpec::parse("/opt/py/python3").anchored_at(Path::new("/home/me"));
        assert_eq!(absolute, InterpreterSpec::Path(PathBuf::from("/opt/py/python3")));

        let searched = InterpreterSpec::parse("python3").anchored_at(Path::new("/home/me"));
        assert!(matches!(searched, InterpreterSpec::Search { .. }));
    }

    #[test]
    fn directory_is_not_an_interpreter() {
        let fs = MockFileSystem::new();
        fs.add_dir("/opt/py");
        let search = DirListSearch::new(&fs, Vec::<PathBuf>::new());

        let res = InterpreterSpec::Path("/opt/py".into()).locate(&fs, &search);
        assert!(matches!(res, Err(LauncherError::InterpreterNotFound { .. })));
    }

    #[test]
    fn search_prefers_path_then_fallbacks() {
        let fs = MockFileSystem::new();
        fs.add_file("/usr/bin/python3", b"");
        fs.add_file("/home/me/.local/bin/python", b"");
        let search = DirListSearch::new(&fs, ["/home/me/.local/bin"]);

        let spec = InterpreterSpec::Search {
            names: vec!["python3".into(), "python".into()],
            fallbacks: vec!["/usr/bin/python3".into()],
        };
        assert_eq!(
            spec.locate(&fs, &search).unwrap(),
            PathBuf::from("/home/me/.local/bin/python")
        );

        let empty = DirListSearch::new(&fs, Vec::<PathBuf>::new());
        assert_eq!(spec.locate(&fs, &empty).unwrap(), PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn failed_search_names_first_program() {
        let fs = MockFileSystem::new();
        let search = DirListSearch::new(&fs, ["/bin"]);
        let spec = InterpreterSpec::Search {
            names: vec!["python3".into(), "python".into()],
            fallbacks: vec![],
        };
        match spec.locate(&fs, &search) {
            Err(LauncherError::InterpreterNotFound { path }) => {
                assert_eq!(path, PathBuf::from("python3"))
            }
            other => panic!("expected InterpreterNotFound, got {other:?}"),
        }
    }
}
