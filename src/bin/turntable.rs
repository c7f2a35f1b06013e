//! Provides the `turntable-cli` tool for inspecting the thumbnail cache.
//!
//! The generation pipeline needs a live host engine, so the CLI covers the
//! engine-free side: deriving artifact names, checking which assets in a
//! folder are cached, and summarizing the error report.
//!
//! Usage:
//! ```text
//! turntable-cli key <model_path>
//! turntable-cli status <folder> [thumbnail_root]
//! turntable-cli report <report_file>
//! ```

use std::path::PathBuf;
use std::process;

use walkdir::WalkDir;

use turntable::cache::{self, ThumbnailStore};
use turntable::config::PipelineConfig;
use turntable::report::ReportSink;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "key" => cmd_key(&args[2]),
        "status" => cmd_status(&args[2], args.get(3).map(PathBuf::from)),
        "report" => cmd_report(&args[2]),
        other => {
            eprintln!("Error: unknown command: {other}");
            usage(&args[0]);
            process::exit(1);
        }
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <command> ...");
    eprintln!("  key <model_path>                  print derived artifact filenames");
    eprintln!("  status <folder> [thumbnail_root]  list cached/missing thumbnails");
    eprintln!("  report <report_file>              summarize the error report");
}

fn cmd_key(path: &str) {
    println!("image: {}", cache::image_file_name(path));
    println!("clip:  {}", cache::clip_file_name(path));
}

fn cmd_status(folder: &str, root: Option<PathBuf>) {
    let root = root.unwrap_or_else(|| PipelineConfig::default().thumbnail_root);
    let store = ThumbnailStore::new(&root);

    let mut total = 0usize;
    let mut cached = 0usize;

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !cache::is_supported(path) {
            continue;
        }
        total += 1;

        let has_image = store.has_image(path);
        let has_clip = store.clip_path(path).exists();
        if has_image {
            cached += 1;
        }

        let marker = match (has_image, has_clip) {
            (true, true) => "[ok ]",
            (true, false) => "[img]",
            _ => "[---]",
        };
        println!("{marker} {}", path.display());
    }

    println!("{cached}/{total} cached (root: {})", root.display());
}

fn cmd_report(path: &str) {
    let sink = ReportSink::new(path);
    let entries = match sink.read_all() {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("Error: could not read report: {err}");
            process::exit(1);
        }
    };

    println!("{} recorded failures", entries.len());
    for entry in &entries {
        println!("{}  {}  {}", entry.created_at, entry.model, entry.error);
    }
}
