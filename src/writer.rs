//! Reading and writing localization documents.
//!
//! The game rejects a `global.ini` that starts with a byte order mark, so
//! reads strip one and writes never emit one. Writes go through a temp file
//! in the destination directory followed by an atomic persist, so an
//! interrupted run never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a document as UTF-8, tolerating (and dropping) a leading BOM.
pub fn read_text(path: &Path) -> io::Result<String> {
    let mut bytes = fs::read(path)?;
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8", path.display()),
        )
    })
}

/// Newline style of a document: CRLF if any CRLF appears, otherwise LF.
pub fn newline_style(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

pub fn has_final_newline(text: &str) -> bool {
    text.ends_with('\n')
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write UTF-8 text with no BOM, atomically.
///
/// The temp file lives next to the destination so the final rename stays on
/// one filesystem. Parent directories are created as needed.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
