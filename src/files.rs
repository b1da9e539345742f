//! Open, read and write "files" where `-` means stdin/stdout and
//! `http://` / `https://` names are fetched over the network.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::constants::STDIO_NAME;
use crate::error::{CmdError, Result};
use crate::http::HttpReader;

/// Whether `name` should be fetched rather than opened from disk.
pub fn is_url(name: &str) -> bool {
    name.starts_with("https://") || name.starts_with("http://")
}

/// Open a file, stdin (`-`), or a URL for reading.
pub fn open_file_or_stdin(name: &str) -> Result<Box<dyn BufRead>> {
    if name == STDIO_NAME {
        return Ok(Box::new(io::stdin().lock()));
    }
    if is_url(name) {
        return Ok(Box::new(HttpReader::open(name, None)?));
    }
    let file = File::open(name).map_err(|source| CmdError::Open {
        path: Path::new(name).to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read a file, stdin (`-`), or a URL to a string.
pub fn read_file_or_stdin(name: &str) -> Result<String> {
    let mut reader = open_file_or_stdin(name)?;
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| CmdError::Read {
            name: name.to_string(),
            source,
        })?;
    Ok(contents)
}

/// Write `contents` to a file, or to stdout (flushed) for `-`.
pub fn write_to_file_or_stdout(name: &str, contents: &str) -> Result<()> {
    let write_err = |source| CmdError::Write {
        name: name.to_string(),
        source,
    };
    if name == STDIO_NAME {
        let mut out = io::stdout().lock();
        out.write_all(contents.as_bytes()).map_err(write_err)?;
        return out.flush().map_err(write_err);
    }
    std::fs::write(name, contents).map_err(write_err)
}

/// Read, transform, and write back only if something changed.
///
/// Returns whether the contents changed. For `-` the result goes to stdout.
pub fn update_in_place<F>(name: &str, changer: F) -> Result<bool>
where
    F: FnOnce(&str) -> String,
{
    let contents = read_file_or_stdin(name)?;
    let updated = changer(&contents);
    if updated == contents {
        return Ok(false);
    }
    tracing::debug!(file = name, "updated file");
    write_to_file_or_stdout(name, &updated)?;
    Ok(true)
}

/// Read, transform, and print the result to `out` if something changed.
pub fn update_and_print<F, W>(name: &str, changer: F, out: &mut W) -> Result<bool>
where
    F: FnOnce(&str) -> String,
    W: Write + ?Sized,
{
    let contents = read_file_or_stdin(name)?;
    let updated = changer(&contents);
    if updated == contents {
        return Ok(false);
    }
    let write_err = |source| CmdError::Write {
        name: STDIO_NAME.to_string(),
        source,
    };
    out.write_all(updated.as_bytes()).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    Ok(true)
}

/// The given names, or `-` (stdin) when there are none.
pub fn filenames_or_stdin(names: Vec<String>) -> Vec<String> {
    if names.is_empty() {
        vec![STDIO_NAME.to_string()]
    } else {
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_detection() {
        assert!(is_url("https://example.com/a.txt"));
        assert!(is_url("http://example.com"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("notes/http://x"));
        assert!(!is_url("-"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_file_or_stdin("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, CmdError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let name = path.to_str().unwrap();
        write_to_file_or_stdout(name, "one\ntwo\n").unwrap();
        assert_eq!(read_file_or_stdin(name).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn in_place_rewrites_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();
        let name = path.to_str().unwrap();

        assert!(!update_in_place(name, |s| s.to_string()).unwrap());
        assert!(update_in_place(name, |s| s.to_uppercase()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "HELLO");
    }

    #[test]
    fn print_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();
        let name = path.to_str().unwrap();

        let mut out = Vec::new();
        assert!(!update_and_print(name, |s| s.to_string(), &mut out).unwrap());
        assert!(out.is_empty());

        assert!(update_and_print(name, |s| s.replace('h', "j"), &mut out).unwrap());
        assert_eq!(out, b"jello");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn no_names_means_stdin() {
        assert_eq!(filenames_or_stdin(vec![]), ["-"]);
        assert_eq!(filenames_or_stdin(vec!["a".into(), "b".into()]), ["a", "b"]);
    }
}
