//! Byte-level constants of the Android backup container and the converted archive

/// Magic at offset 0 of every `adb backup` container.
pub const AB_MAGIC: &[u8; 14] = b"ANDROID BACKUP";

/// Length of the container header block that is dropped during conversion.
/// Bytes after the magic (version, compression flag, encryption name) are not examined.
pub const HEADER_LEN: usize = 24;

/// Written in place of the container header. These are the gzip member magic,
/// method and zeroed flags/mtime, kept byte-exact for tools that expect them.
pub const ARCHIVE_PREFIX: [u8; 8] = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Container written by `adb backup` inside the backup directory.
pub const CONTAINER_FILE_NAME: &str = "backup.ab";

/// Converted archive written next to the container.
pub const ARCHIVE_FILE_NAME: &str = "backup.tar";

/// True when `header` starts with the container magic.
pub fn has_container_magic(header: &[u8]) -> bool {
    header.len() >= AB_MAGIC.len() && &header[..AB_MAGIC.len()] == AB_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_fits_in_header() {
        assert!(AB_MAGIC.len() < HEADER_LEN);
    }

    #[test]
    fn test_magic_detection() {
        assert!(has_container_magic(b"ANDROID BACKUP\n5\n1\nnone\n"));
        assert!(has_container_magic(b"ANDROID BACKUP"));
        assert!(!has_container_magic(b"ANDROID BACKU"));
        assert!(!has_container_magic(b"android backup\n5\n1\nnone\n"));
        assert!(!has_container_magic(b""));
    }
}
