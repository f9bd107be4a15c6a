use anyhow::{Context, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;

// Upper bound on buffer preallocation; the declared entry size is untrusted.
const MAX_PREALLOC: u64 = 64 << 20;

/// Reads the full contents of entry `name` from a `.zip` archive.
pub fn read_zip_entry<R: Read + Seek>(reader: R, name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(reader)
        .context("failed to read zip archive")?;

    let mut entry = archive
        .by_name(name)
        .with_context(|| format!("zip archive has no entry {name:?}"))?;

    let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
    entry
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to decompress {name:?}"))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, zip::write::SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn reads_named_entry() {
        let bytes = archive(&[("a.yaml", "alpha"), ("b.yaml", "beta")]);
        assert_eq!(read_zip_entry(Cursor::new(&bytes), "b.yaml").unwrap(), b"beta");
    }

    #[test]
    fn missing_entry_fails() {
        let bytes = archive(&[("a.yaml", "alpha")]);
        assert!(read_zip_entry(Cursor::new(&bytes), "c.yaml").is_err());
    }

    #[test]
    fn oversized_declared_size_does_not_preallocate() {
        let mut bytes = archive(&[("a.yaml", "alpha")]);
        let central = bytes.windows(4).rposition(|w| w == b"PK\x01\x02").unwrap();
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let result = read_zip_entry(Cursor::new(&bytes), "a.yaml");
        assert!(result.map_or(true, |body| body == b"alpha"));
    }

    #[test]
    fn not_a_zip_fails() {
        assert!(read_zip_entry(Cursor::new(b"plain text".to_vec()), "a.yaml").is_err());
    }
}
