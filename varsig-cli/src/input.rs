//! Reading command line inputs and writing raw outputs.
//!
//! An argument that names an existing file is read from disk. Otherwise it is
//! hex, with an optional `0x`. Payloads that are neither are taken as text.

use eyre::{Result, WrapErr};
use std::{fs, path::Path};

/// Read a file path or hex argument.
pub(crate) fn read_bytes(arg: &str) -> Result<Vec<u8>> {
    if let Some(bytes) = read_file(arg)? {
        return Ok(bytes);
    }
    parse_hex(arg).wrap_err_with(|| format!("{arg:?} is neither a file nor hex"))
}

/// Read a payload argument.
///
/// With `text`, the argument is always its own UTF-8 bytes.
pub(crate) fn read_payload(arg: &str, text: bool) -> Result<Vec<u8>> {
    if text {
        return Ok(arg.as_bytes().to_vec());
    }
    if let Some(bytes) = read_file(arg)? {
        return Ok(bytes);
    }
    Ok(parse_hex(arg).unwrap_or_else(|_| {
        tracing::debug!("payload is not hex, signing it as text");
        arg.as_bytes().to_vec()
    }))
}

/// Write raw bytes to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, bytes).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn read_file(arg: &str) -> Result<Option<Vec<u8>>> {
    let path = Path::new(arg);
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(Some(bytes))
}

fn parse_hex(arg: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = arg.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits)
}
