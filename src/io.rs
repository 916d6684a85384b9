//! Scoped file access shared by catalogs, configuration, `.dat` import and export.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CatalogError, Result};

fn io_error(path: &Path) -> impl Fn(std::io::Error) -> CatalogError + '_ {
    move |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a whole text file. The handle is closed on every return path.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(io_error(path))?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(io_error(path))?;
    Ok(text)
}

/// Creates or truncates `path` and writes `text` to it.
pub(crate) fn write_string(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path).map_err(io_error(path))?;
    file.write_all(text.as_bytes()).map_err(io_error(path))?;
    file.flush().map_err(io_error(path))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SectionError;

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        write_string(&path, "hello").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn missing_file_carries_path() {
        let path = Path::new("/no/such/dir/file.txt");
        match read_to_string(path) {
            Err(SectionError::Catalog(CatalogError::Io { path: p, .. })) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
