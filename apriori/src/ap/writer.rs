use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::utils::FrequentPatterns;
use crate::error::{Error, Result};

/// Writes `|FPs| = N` followed by one `<pattern> : <support>` line per
/// pattern, levels ascending, patterns in ascending order within a level.
pub fn write_patterns<W: Write>(sink: W, patterns: &FrequentPatterns) -> std::io::Result<()> {
    let mut sink = BufWriter::new(sink);
    writeln!(sink, "|FPs| = {}", patterns.total())?;
    for (pattern, support) in patterns.iter() {
        writeln!(sink, "{pattern} : {support}")?;
    }
    sink.flush()
}

/// Replaces `path` with the rendered patterns. The content goes to a
/// temporary file next to `path` first, so a failure leaves any previous file
/// untouched.
pub fn write_to_path(path: &Path, patterns: &FrequentPatterns) -> Result<()> {
    let context = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(context.clone(), e))?;
    write_patterns(file.as_file_mut(), patterns).map_err(|e| Error::io(context.clone(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| Error::io(context.clone(), e))?;
    file.persist(path).map_err(|e| Error::io(context, e.error))?;
    Ok(())
}
