//! Main entry point for the assetpack CLI app

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use assetpack::cli::{self, Commands, StrategyKind};
use assetpack::common::{format_size, load_custom_tree};
use assetpack::export::{self, ExportOptions};
use assetpack::progress::{ProgressCallback, ProgressState};
use assetpack::{buckets, classify, walk};

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run_app() {
        if e.downcast_ref::<clap::Error>().is_none() {
            eprintln!("Error: {}", e);
        }
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::run()?;

    match &command {
        Commands::Pack { inputs, strategy, name, output, level, tree, progress } => {
            let package = cli::sanitize_package_name(name);
            if package.is_empty() {
                return Err("package name is empty after sanitization".into());
            }
            std::fs::create_dir_all(output)?;

            let mut opts = ExportOptions::new(package, output);
            opts.level = *level;

            let progress_cb: Option<Box<ProgressCallback>> = if *progress {
                Some(Box::new(create_cli_progress_callback()))
            } else {
                None
            };

            let written = match strategy {
                StrategyKind::Marketplace | StrategyKind::Categorized => {
                    if inputs.is_empty() {
                        return Err("at least one input file or directory is required".into());
                    }
                    let files = walk::collect_input_files(inputs)?;
                    match strategy {
                        StrategyKind::Marketplace => {
                            export::export_marketplace(&files, &opts, progress_cb)?
                        }
                        _ => export::export_categorized(&files, &opts, progress_cb)?,
                    }
                }
                StrategyKind::Custom => {
                    let tree_path = tree
                        .as_ref()
                        .ok_or("--tree is required for the custom strategy")?;
                    let children = load_custom_tree(tree_path)?;
                    export::export_custom(&children, &opts, progress_cb)?
                }
            };

            for path in &written {
                println!("{}", path.display());
            }
        }
        Commands::Inspect { inputs } => {
            let files = walk::collect_input_files(inputs)?;
            print_inspection(&files);
        }
    }

    Ok(())
}

fn print_inspection(files: &[assetpack::common::InputFile]) {
    let buckets = buckets::build_buckets(files);

    println!("{} file(s)", files.len());
    for (format, models) in &buckets.models {
        println!("  {} model(s): {}", format, models.len());
        for m in models {
            println!("    {} ({})", m.path, format_size(m.size));
        }
    }
    let sections = [
        ("Textures", &buckets.textures),
        ("Unity packages", &buckets.packages),
        ("Engine assets", &buckets.engine_assets),
        ("Materials", &buckets.materials),
        ("Source scenes", &buckets.source_scenes),
        ("Other", &buckets.other),
    ];
    for (label, bucket) in sections {
        if bucket.is_empty() {
            continue;
        }
        println!("  {}: {}", label, bucket.len());
        for f in bucket {
            println!("    {} ({})", f.path, format_size(f.size));
        }
    }
    if !classify::has_textures_folder(files) {
        println!("note: no 'Textures' folder found; the marketplace layout works best with one");
    }
}

// --- stderr progress bar -----------------------------------------------------

fn create_cli_progress_callback() -> impl Fn(ProgressState) + Send + Sync + 'static {
    let start_time = Instant::now();
    let prev_len = Mutex::new(0usize);

    move |state: ProgressState| {
        let term_width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
        let bar_width: usize = 30;
        let filled = ((state.percent / 100.0) * bar_width as f32) as usize;
        let bar = format!("[{}{}]", "█".repeat(filled), "░".repeat(bar_width - filled));

        let elapsed = start_time.elapsed().as_secs_f32();
        let mut line = format!(
            "{} {:.1}% | {}/{} entries | {:.1}s | {}",
            bar, state.percent, state.current, state.total, elapsed, state.label
        );
        if line.chars().count() > term_width {
            line = line.chars().take(term_width).collect();
        }

        let mut padded = line.clone();
        {
            let mut prev = prev_len.lock().unwrap();
            if *prev > padded.len() {
                padded.push_str(&" ".repeat(*prev - padded.len()));
            }
            *prev = padded.len();
        }
        eprint!("\r\x1B[2K{}", padded);
        io::stderr().flush().ok();

        if state.percent >= 100.0 {
            eprintln!();
        }
    }
}
