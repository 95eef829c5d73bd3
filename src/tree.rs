//! Visual directory tree rendering.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::Result;
use crate::error::FlattenError;
use crate::filter::IgnoreFilter;

/// Renders a directory subtree as a connector-glyph tree string.
///
/// Pure read pass: no filesystem side effects. Entries matching the filter
/// are absent from the output. A directory that cannot be listed due to
/// permissions still gets its own line plus a `[Permission Denied]` child
/// line; any other I/O failure aborts the render.
pub fn render(root: &Path, filter: &IgnoreFilter) -> Result<String> {
    render_node(root, "", true, filter)
}

fn render_node(path: &Path, indent: &str, is_last: bool, filter: &IgnoreFilter) -> Result<String> {
    if filter.is_ignored(path) {
        return Ok(String::new());
    }

    let label = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        // Drive/volume roots have no basename.
        None => path.display().to_string(),
    };

    let mut visual = String::new();
    if indent.is_empty() {
        visual.push_str(&label);
    } else {
        visual.push_str(indent);
        visual.push_str(connector(is_last));
        visual.push_str(&label);
    }
    visual.push('\n');

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            visual.push_str(indent);
            visual.push_str("  [Permission Denied]\n");
            return Ok(visual);
        }
        Err(e) => return Err(FlattenError::Io(e)),
    };

    let mut names: Vec<OsString> = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !filter.is_ignored(&path.join(entry.file_name())) {
            names.push(entry.file_name());
        }
    }
    // Sort before deciding the last child, so connectors follow sorted order.
    names.sort();

    for (i, name) in names.iter().enumerate() {
        let child = path.join(name);
        let last = i + 1 == names.len();
        if child.is_dir() {
            let grown = format!("{indent}{}", indent_unit(is_last));
            visual.push_str(&render_node(&child, &grown, last, filter)?);
        } else {
            visual.push_str(indent);
            visual.push_str(connector(last));
            visual.push_str(&name.to_string_lossy());
            visual.push('\n');
        }
    }

    Ok(visual)
}

pub(crate) fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

pub(crate) fn indent_unit(is_last: bool) -> &'static str {
    if is_last { "    " } else { "│   " }
}
