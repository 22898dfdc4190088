/*!
File handle values. A [`ReadHandle`] opens its path for reading the moment
it's set and a [`WriteHandle`] creates (or truncates) its path, so a bad path
is reported while the command line is being parsed rather than later. Unset
handles fall back to the standard streams.
 */

use std::{
    fmt,
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use crate::errors::ConversionError;

/// A readable file, or standard input if none was given
#[derive(Debug, Default)]
pub enum ReadHandle {
    #[default]
    Stdin,
    File {
        path: PathBuf,
        file: File,
    },
}

impl ReadHandle {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConversionError> {
        let path = path.into();

        match File::open(&path) {
            Ok(file) => Ok(Self::File { path, file }),
            Err(source) => Err(ConversionError::CannotOpen { path, source }),
        }
    }

    /// The path this handle was opened from, if it isn't standard input
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File { path, .. } => Some(path),
        }
    }
}

impl Read for ReadHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin => io::stdin().read(buf),
            Self::File { file, .. } => file.read(buf),
        }
    }
}

impl fmt::Display for ReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// A writable file, or standard output if none was given
#[derive(Debug, Default)]
pub enum WriteHandle {
    #[default]
    Stdout,
    File {
        path: PathBuf,
        file: File,
    },
}

impl WriteHandle {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ConversionError> {
        let path = path.into();

        match File::create(&path) {
            Ok(file) => Ok(Self::File { path, file }),
            Err(source) => Err(ConversionError::CannotOpen { path, source }),
        }
    }

    /// The path this handle was created at, if it isn't standard output
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File { path, .. } => Some(path),
        }
    }
}

impl Write for WriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout => io::stdout().write(buf),
            Self::File { file, .. } => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::File { file, .. } => file.flush(),
        }
    }
}

impl fmt::Display for WriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::errors::ConversionKind;

    #[test]
    fn read_handle_reads_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "hello").unwrap();

        let mut handle = ReadHandle::open(&path).unwrap();
        let mut contents = String::new();
        handle.read_to_string(&mut contents).unwrap();

        assert_eq!(contents, "hello");
        assert_eq!(handle.path(), Some(path.as_path()));
    }

    #[test]
    fn read_handle_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = ReadHandle::open(dir.path().join("absent.txt")).unwrap_err();

        assert_eq!(error.kind(), ConversionKind::CannotOpen);
    }

    #[test]
    fn write_handle_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        fs::write(&path, "stale contents").unwrap();

        let mut handle = WriteHandle::create(&path).unwrap();
        handle.write_all(b"new").unwrap();
        handle.flush().unwrap();
        drop(handle);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_handle_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.txt");
        let error = WriteHandle::create(&path).unwrap_err();

        assert_eq!(error.kind(), ConversionKind::CannotOpen);
        assert!(!path.exists());
    }

    #[test]
    fn defaults_are_standard_streams() {
        assert_eq!(ReadHandle::default().to_string(), "<stdin>");
        assert_eq!(WriteHandle::default().to_string(), "<stdout>");
        assert!(ReadHandle::default().path().is_none());
    }
}
