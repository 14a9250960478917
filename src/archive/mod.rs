// Archive module - container to tar conversion and extraction
//
// An `adb backup` container is a 24-byte text header followed by the payload.
// Conversion swaps the header for a fixed 8-byte prefix and keeps the payload
// untouched; extraction hands the result to the system `tar`.

pub mod converter;
pub mod extractor;
pub mod format;
pub mod validate;


pub use converter::ArchiveConverter;
pub use extractor::{ArchiveExtractor, TarShell, extraction_dir};
pub use validate::{ArchiveValidator, TarSniffer};
