use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use dirflat::filter::IgnoreFilter;
use dirflat::{flatten, report, tree};

const DEFAULT_OUTPUT_BASE: &str = "flat";

fn print_usage(program: &str) {
    println!("Usage: {} [SOURCE] [OUTPUT_BASE]", program);
    println!("\nArguments:");
    println!("  SOURCE         Directory to walk (default: current directory)");
    println!(
        "  OUTPUT_BASE    Base name for the output folder (default: {})",
        DEFAULT_OUTPUT_BASE
    );
    println!("\nOptions:");
    println!("  --help         Show this help message");
}

fn print_banner() {
    let art = [
        "     /\\     ",
        "    /  \\    ",
        "   /    \\   ",
        "  /______\\  ",
        "    ||||    ",
        "    ||||    ",
    ];
    println!("{}", art.join("\n"));
    println!("\nDirectory Tree Generator");
    println!("{}\n", "=".repeat(20));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        return Ok(());
    }
    let source = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_base = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| DEFAULT_OUTPUT_BASE.to_string());

    print_banner();

    let filter = IgnoreFilter::new(&output_base);
    let abs_source = std::path::absolute(&source)
        .with_context(|| format!("cannot resolve source path {}", source.display()))?;

    // Render pass runs fully before the output folder exists, so the
    // renderer's own output can never be flattened.
    println!("\nGenerating visual directory structure...");
    println!("\nDirectory Tree for: {}", abs_source.display());
    let visual_tree = tree::render(&source, &filter)
        .with_context(|| format!("failed to render {}", source.display()))?;
    println!("\nDirectory Structure:");
    println!("{visual_tree}");

    let dest = flatten::create_output_dir(Path::new("."), &output_base)
        .context("failed to create output folder")?;
    println!("\nCreated output folder: {}", dest.display());

    println!("\nDirectory Tree for: {}", abs_source.display());
    println!(".");
    let outcome = flatten::flatten(&source, &dest, &filter)
        .with_context(|| format!("failed to flatten {}", source.display()))?;
    info!("{} file(s) copied", outcome.copied);

    let tree_file = report::write_report(&dest, &source, &visual_tree, &outcome.report)
        .context("failed to write report")?;

    println!("\nTree structure has been saved to: {}", tree_file.display());
    println!("All files have been copied to: {}", dest.display());
    Ok(())
}
