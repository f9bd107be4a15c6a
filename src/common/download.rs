use std::{fs::File, io::{Read, Write}, path::{Path, PathBuf}, time::Duration};

use anyhow::{Context, Result, bail};
use reqwest::{blocking::Client, redirect::Policy};
use tempfile::NamedTempFile;

const USER_AGENT: &str = concat!("projflow/", env!("CARGO_PKG_VERSION"));

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Write-then-rename wrapper for atomic big-file outputs
struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl PendingWrite {
    /// Open a file for a big write.
    fn open(target: &Path, force: bool) -> Result<Self> {
        let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
        if !force && target.exists() {
            bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
        }
        let tmp = NamedTempFile::new_in(parent).context("create temp file")?;

        Ok(Self { target: target.to_path_buf(), tmp })
    }

    /// Finalize the big write.
    fn finalize(self) -> Result<()> {
        self.tmp.as_file().sync_all().ok(); // best-effort fsync file
        self.tmp.persist(&self.target)
            .with_context(|| format!("rename to {}", self.target.display()))?;
        if let Some(dir) = self.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .redirect(Policy::limited(10))
        .timeout(Duration::from_secs(300))
        .build()?)
}

/// Download a large file from `file_url` to `out_path`.
pub fn download_big_file(file_url: &str, out_path: &Path, force: bool) -> Result<()> {
    // Safe big-file write (tempfile -> atomic rename), no accidental overwrite unless --force
    let mut sink = PendingWrite::open(out_path, force)?;

    let mut resp = client()?
        .get(file_url)
        .send()
        .with_context(|| format!("GET {file_url}"))?
        .error_for_status()
        .with_context(|| format!("GET {file_url} returned error status"))?;

    std::io::copy(&mut resp, &mut sink).with_context(|| format!("write {}", out_path.display()))?;

    sink.finalize()
}

/// Fetch the full body of `url` into memory.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let mut resp = client()?
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned error status"))?;

    let mut bytes = Vec::new();
    resp.read_to_end(&mut bytes).with_context(|| format!("read body of {url}"))?;
    Ok(bytes)
}
