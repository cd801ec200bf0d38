use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR: &str = "output";

/// `<dir of file>/../output/<name>`.
///
/// Pass `file!()` to resolve relative to the calling source file.
pub fn output_file_path(file: impl AsRef<Path>, name: &str) -> PathBuf {
    let dir = file.as_ref().parent().unwrap_or_else(|| Path::new(""));
    dir.join("..").join(OUTPUT_DIR).join(name)
}

/// Writes `data` to `path` byte for byte, creating the parent directory.
pub fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
