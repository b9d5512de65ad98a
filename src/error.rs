use std::io;
use std::path::PathBuf;

/// Errors surfaced by fallible [`crate::Pwl`] operations.
///
/// Per the crate's error-handling policy, this type only ever reaches a
/// caller for conditions that are genuinely fatal to the requested
/// operation. Malformed lines, oversize lines, and a missing backing file
/// on anything other than [`crate::Pwl::with_file`] are logged via `log`
/// and silently skipped instead — see `SPEC_FULL.md` section 4.G.
#[derive(Debug, thiserror::Error)]
pub enum PwlError {
    #[error("could not open or create backing file {path}: {source}")]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
