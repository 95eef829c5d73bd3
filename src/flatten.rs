//! Flattening copy pass: re-walks the source tree, logs a parallel tree
//! report, and copies every surviving file into one flat destination.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use filetime::FileTime;

use crate::Result;
use crate::error::FlattenError;
use crate::filter::IgnoreFilter;
use crate::tree::{connector, indent_unit};

/// What the copy pass produced: the ordered report lines (entry lines
/// interleaved with skip/permission notices) and the number of files copied.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub report: Vec<String>,
    pub copied: usize,
}

/// Creates the per-run destination directory `<base>_<YYYYMMDD_HHMMSS>`
/// under `parent`. Timestamp granularity is seconds; if a second run lands
/// in the same second, a numeric suffix keeps the directories distinct.
pub fn create_output_dir(parent: &Path, base: &str) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut dest = parent.join(format!("{base}_{stamp}"));
    let mut n = 2;
    while dest.exists() {
        dest = parent.join(format!("{base}_{stamp}_{n}"));
        n += 1;
    }
    fs::create_dir_all(&dest)?;
    Ok(dest)
}

/// Walks `root` depth-first in sorted order, mirroring the render pass's
/// filtering, and copies every file into `dest` with collision-resolved
/// names. Entry lines are printed live and accumulated for the report.
///
/// Permission failures (listing or copying) and same-file copies are logged
/// and skipped; any other I/O failure aborts the walk.
pub fn flatten(root: &Path, dest: &Path, filter: &IgnoreFilter) -> Result<FlattenOutcome> {
    let mut outcome = FlattenOutcome::default();
    flatten_dir(root, "", dest, filter, &mut outcome)?;
    Ok(outcome)
}

fn notice(outcome: &mut FlattenOutcome, line: String) {
    println!("{line}");
    outcome.report.push(line);
}

fn flatten_dir(
    path: &Path,
    prefix: &str,
    dest: &Path,
    filter: &IgnoreFilter,
    outcome: &mut FlattenOutcome,
) -> Result<()> {
    if filter.is_ignored(path) {
        notice(
            outcome,
            format!("Skipping ignored directory: {}", path.display()),
        );
        return Ok(());
    }
    // The realized destination folder is never flattened into itself.
    if path.file_name().is_some() && path.file_name() == dest.file_name() {
        return Ok(());
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            notice(outcome, format!("Permission denied: {}", path.display()));
            return Ok(());
        }
        Err(e) => return Err(FlattenError::Io(e)),
    };

    let mut names: Vec<OsString> = Vec::new();
    for entry in entries {
        names.push(entry?.file_name());
    }
    names.sort();

    // Last-child connectors are decided among surviving entries only, so
    // both passes draw the same tree shape.
    let last_surviving = names
        .iter()
        .rposition(|name| !filter.is_ignored(&path.join(name)));

    for (i, name) in names.iter().enumerate() {
        let current = path.join(name);
        if filter.is_ignored(&current) {
            notice(
                outcome,
                format!("Skipping ignored file/directory: {}", current.display()),
            );
            continue;
        }

        let is_last = Some(i) == last_surviving;
        let line = format!("{prefix}{}{}", connector(is_last), name.to_string_lossy());
        println!("{line}");
        outcome.report.push(line);

        if current.is_dir() {
            let next_prefix = format!("{prefix}{}", indent_unit(is_last));
            flatten_dir(&current, &next_prefix, dest, filter, outcome)?;
        } else {
            match copy_flat(&current, dest) {
                Ok(final_name) => {
                    outcome.copied += 1;
                    println!("Copied: {} -> {}", name.to_string_lossy(), final_name);
                }
                Err(e) if e.is_recoverable() => {
                    notice(outcome, format!("Error copying {}: {e}", current.display()));
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(())
}

/// Copies `src` into `dest` under a collision-resolved name, carrying
/// permissions (via `fs::copy`) and timestamps (best-effort).
fn copy_flat(src: &Path, dest: &Path) -> Result<String> {
    // A source entry that resolves to a file already sitting in the
    // destination (e.g. a symlink into it) must not be "renamed around":
    // that is a same-file copy, caught before collision resolution.
    let candidate = dest.join(src.file_name().unwrap_or_default());
    if let (Ok(a), Ok(b)) = (src.canonicalize(), candidate.canonicalize()) {
        if a == b {
            return Err(FlattenError::SameFile {
                path: src.to_path_buf(),
            });
        }
    }

    let target = resolve_collision(dest, src);
    fs::copy(src, &target).map_err(|e| FlattenError::from_io(e, src))?;
    copy_times(src, &target);

    Ok(target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Picks a free name for `src` inside `dest`: the plain basename if
/// unoccupied, else `stem_<n>.ext` for the smallest n >= 1. Consults the
/// destination's live contents on every call, so two same-named files in
/// one run resolve deterministically in traversal order.
pub fn resolve_collision(dest: &Path, src: &Path) -> PathBuf {
    let name = src.file_name().unwrap_or_default();
    let candidate = dest.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1;
    loop {
        let candidate = dest.join(format!("{stem}_{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn copy_times(src: &Path, dst: &Path) {
    if let Ok(meta) = fs::metadata(src) {
        let atime = FileTime::from_last_access_time(&meta);
        let mtime = FileTime::from_last_modification_time(&meta);
        let _ = filetime::set_file_times(dst, atime, mtime);
    }
}
