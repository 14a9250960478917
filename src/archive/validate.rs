// Structural check of the converted archive
use super::format::ARCHIVE_PREFIX;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Decides whether a converted file is usable as an archive.
pub trait ArchiveValidator: Send + Sync {
    fn validate(&self, path: &Path) -> Result<(), String>;
}

/// Sniffs the file as a tar stream: the first header block must be complete
/// and carry a valid checksum. A file starting with the gzip magic is read
/// through a gzip decoder first, otherwise it is taken as a plain tar. A
/// stream with no blocks at all is an empty archive and passes.
///
/// Only the first header is inspected, the archive is not decoded further.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarSniffer;

impl ArchiveValidator for TarSniffer {
    fn validate(&self, path: &Path) -> Result<(), String> {
        let mut file = File::open(path).map_err(|e| format!("cannot reopen output: {e}"))?;
        let compressed = starts_with_gzip_magic(&mut file)
            .map_err(|e| format!("cannot read output: {e}"))?;
        if compressed {
            first_entry(GzDecoder::new(file))
        } else {
            first_entry(file)
        }
    }
}

/// Peeks at the first two bytes and rewinds.
fn starts_with_gzip_magic(file: &mut File) -> io::Result<bool> {
    let mut magic = Vec::with_capacity(2);
    file.by_ref().take(2).read_to_end(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(magic[..] == ARCHIVE_PREFIX[..2])
}

fn first_entry<R: Read>(reader: R) -> Result<(), String> {
    let mut archive = tar::Archive::new(reader);
    let mut entries = archive
        .entries()
        .map_err(|e| format!("not a tar stream: {e}"))?;
    match entries.next() {
        Some(Err(e)) => Err(format!("not a tar stream: {e}")),
        Some(Ok(_)) | None => Ok(()),
    }
}
