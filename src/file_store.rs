//! The backing-file format: one word per line, UTF-8, with an optional
//! leading BOM and `#`-comment lines. See `SPEC_FULL.md` section 4.F.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::SystemTime;

use crate::error::PwlError;

/// Lines longer than this are discarded with a warning, along with the
/// rest of that line -- matching the fixed-buffer behavior of the
/// original `BUFSIZ`-sized line reader this format comes from.
const MAX_LINE_BYTES: usize = 8192;

/// Opens `path` for reading, creating it (and any of its contents) fresh
/// if it doesn't exist yet, matching `Pwl::with_file`'s contract.
pub(crate) fn ensure_exists(path: &Path) -> Result<(), PwlError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| PwlError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads every non-comment, non-blank line of `path`, BOM- and
/// whitespace-stripped, skipping malformed lines with a logged warning.
pub(crate) fn load(path: &Path) -> Result<Vec<String>, PwlError> {
    let file = File::open(path).map_err(|source| PwlError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut words = Vec::new();
    let mut line_no = 0usize;
    let mut first_line = true;

    loop {
        let mut raw = Vec::new();
        let bytes_read = read_line_capped(&mut reader, &mut raw, MAX_LINE_BYTES)?;
        if bytes_read == 0 {
            break;
        }
        line_no += 1;

        let mut slice: &[u8] = &raw;
        if first_line {
            first_line = false;
            slice = strip_bom(slice);
        }

        match std::str::from_utf8(slice) {
            Ok(text) => {
                let trimmed = text.trim_end_matches(['\n', '\r']).trim_end();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                words.push(trimmed.to_string());
            }
            Err(_) => {
                log::warn!("{}: line {line_no} is not valid UTF-8, skipping", path.display());
            }
        }
    }

    Ok(words)
}

/// Reads a single line into `buf`, capped at `cap` bytes. If the line
/// (including its terminator) exceeds `cap`, it is discarded with a
/// warning and `buf` is left empty; the caller still advances past it.
/// Returns the number of bytes consumed from `reader` (0 at EOF).
fn read_line_capped(reader: &mut impl BufRead, buf: &mut Vec<u8>, cap: usize) -> io::Result<usize> {
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw)?;
    if n == 0 {
        return Ok(0);
    }
    if raw.len() > cap {
        log::warn!("line exceeds {cap}-byte limit, discarding");
    } else {
        *buf = raw;
    }
    Ok(n)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
    if bytes.starts_with(&BOM) {
        &bytes[3..]
    } else {
        bytes
    }
}

/// Appends `word` to `path`, first ensuring the file ends with a
/// trailing newline so the append can't glue onto a previous word.
pub(crate) fn append(path: &Path, word: &str) -> Result<(), PwlError> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .map_err(|source| PwlError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let io_err = |source: io::Error| PwlError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let len = file.metadata().map_err(io_err)?.len();
    if len > 0 {
        let mut last_byte = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(io_err)?;
        file.read_exact(&mut last_byte).map_err(io_err)?;
        if last_byte[0] != b'\n' {
            file.write_all(b"\n").map_err(io_err)?;
        }
    }

    file.seek(SeekFrom::End(0)).map_err(io_err)?;
    writeln!(file, "{word}").map_err(io_err)?;
    Ok(())
}

/// Rewrites `path`, dropping every whole-line occurrence of `word`
/// (matched exactly, by original casing) while preserving every other
/// line verbatim -- including a line that merely contains `word` as a
/// substring, which is not a whole-line match and is kept as-is.
pub(crate) fn rewrite_dropping(path: &Path, word: &str) -> Result<(), PwlError> {
    let io_err = |source: io::Error| PwlError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let original = std::fs::read(path).map_err(io_err)?;
    let text = String::from_utf8_lossy(&original);

    let mut rewritten = String::with_capacity(text.len());
    for line in split_keep_terminators(&text) {
        let (content, terminator) = split_terminator(line);
        if content == word {
            continue;
        }
        rewritten.push_str(content);
        rewritten.push_str(terminator);
    }

    std::fs::write(path, rewritten).map_err(io_err)
}

/// Splits `text` into lines that each retain their trailing terminator
/// (if any), so the caller can preserve exact line boundaries when
/// rewriting. Only `\n` is a line boundary, matching `load`'s own
/// `read_until(b'\n', ..)` -- a `\r` immediately before it is part of
/// that same line's terminator (a CRLF line), not a boundary of its own,
/// so a CRLF-terminated line is never split into two synthetic lines.
fn split_keep_terminators(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            out.push(&text[start..=i]);
            start = i + 1;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        (stripped, "\r\n")
    } else if let Some(stripped) = line.strip_suffix('\n') {
        (stripped, "\n")
    } else if let Some(stripped) = line.strip_suffix('\r') {
        (stripped, "\r")
    } else {
        (line, "")
    }
}

/// The backing file's last-modified time, used by `Pwl` to decide
/// whether to rebuild its in-memory state from disk.
pub(crate) fn mtime(path: &Path) -> Result<SystemTime, PwlError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| PwlError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let f = write_file(b"# a comment\n\nword\n  trailing-ws  \n");
        let words = load(f.path()).unwrap();
        assert_eq!(words, vec!["word", "trailing-ws"]);
    }

    #[test]
    fn load_strips_leading_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"word\n");
        let f = write_file(&bytes);
        let words = load(f.path()).unwrap();
        assert_eq!(words, vec!["word"]);
    }

    #[test]
    fn load_skips_oversize_line() {
        let _ = env_logger::try_init();

        let huge = "a".repeat(MAX_LINE_BYTES + 10);
        let contents = format!("short\n{huge}\nafter\n");
        let f = write_file(contents.as_bytes());
        let words = load(f.path()).unwrap();
        assert_eq!(words, vec!["short", "after"]);
    }

    #[test]
    fn load_skips_invalid_utf8_line() {
        let _ = env_logger::try_init();

        let mut contents = b"short\n".to_vec();
        contents.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        contents.extend_from_slice(b"after\n");
        let f = write_file(&contents);
        let words = load(f.path()).unwrap();
        assert_eq!(words, vec!["short", "after"]);
    }

    #[test]
    fn append_adds_trailing_newline_before_appending() {
        let f = write_file(b"existing");
        append(f.path(), "added").unwrap();
        let contents = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(contents, "existing\nadded\n");
    }

    #[test]
    fn append_to_file_already_ending_in_newline() {
        let f = write_file(b"existing\n");
        append(f.path(), "added").unwrap();
        let contents = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(contents, "existing\nadded\n");
    }

    #[test]
    fn rewrite_dropping_removes_whole_line_matches_only() {
        let f = write_file(b"keep\nword\nkeepword\nword\n");
        rewrite_dropping(f.path(), "word").unwrap();
        let contents = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(contents, "keep\nkeepword\n");
    }

    #[test]
    fn rewrite_dropping_treats_crlf_as_one_line_boundary() {
        let f = write_file(b"keep\r\nword\r\n");
        rewrite_dropping(f.path(), "word").unwrap();
        let contents = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(contents, "keep\r\n");
    }
}
