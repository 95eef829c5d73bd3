//! Persists the run's combined report inside the destination directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::Result;

pub const REPORT_FILE_NAME: &str = "directory_tree.txt";

/// Writes `directory_tree.txt` into `dest`: a header naming the absolute
/// root, the visual tree, then the flat report lines under a literal `.`
/// root line. The file mirrors exactly what was printed during the run.
pub fn write_report(
    dest: &Path,
    root: &Path,
    visual_tree: &str,
    report_lines: &[String],
) -> Result<PathBuf> {
    let tree_file = dest.join(REPORT_FILE_NAME);
    let abs_root = std::path::absolute(root)?;

    let mut writer = BufWriter::new(File::create(&tree_file)?);
    write!(writer, "Directory Tree for: {}\n\n", abs_root.display())?;
    writeln!(writer, "Visual Structure:")?;
    writer.write_all(visual_tree.as_bytes())?;
    write!(writer, "\n\nDetailed Structure:\n.\n")?;
    writer.write_all(report_lines.join("\n").as_bytes())?;
    writer.flush()?;

    Ok(tree_file)
}
