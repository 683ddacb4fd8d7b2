use anyhow::Result;
use clap::Parser;
use console::style;

mod cli;
mod error;
mod gif_processing;
mod utils;

use cli::Args;
use gif_processing::{describe_repeat, CropEngine, CropSummary, ProcessingConfig};
use utils::{
    create_frame_spinner, error_println, format_duration, format_file_size, validate_inputs,
    verbose_println,
};

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        // single diagnostic line, exit code 1 for every failure
        error_println(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // Print banner
    println!("{}", style("gifcrop - Animated GIF cropper").bold().blue());
    println!();

    // Validate input path and crop dimensions before any decoding
    validate_inputs(args)?;

    let config = ProcessingConfig {
        crop: args.crop_box(),
        bounds_policy: args.bounds_policy,
        verbose: args.verbose,
    };

    if config.verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Input: {}", args.input.display());
        println!("  Output: {}", args.output.display());
        println!(
            "  Crop box: ({}, {}, {}, {})",
            config.crop.left, config.crop.top, config.crop.right, config.crop.bottom
        );
        println!("  Bounds policy: {:?}", config.bounds_policy);
        println!();
    }

    let engine = CropEngine::new(config);

    let spinner = create_frame_spinner();
    spinner.set_message("Decoding frames...");

    let summary = engine.process_file(&args.input, &args.output, |count| {
        spinner.set_message(format!("Cropped {} frames", count));
        spinner.tick();
    })?;

    spinner.finish_with_message(format!("✓ Cropped {} frames", summary.frame_count));
    println!();

    print_summary(args, &summary);

    Ok(())
}

fn print_summary(args: &Args, summary: &CropSummary) {
    println!("{}", style("Results Summary:").bold().green());
    println!(
        "  Frames: {}",
        style(summary.frame_count).bold().green()
    );
    println!(
        "  Dimensions: {}x{} -> {}x{}",
        summary.input_dimensions.0,
        summary.input_dimensions.1,
        style(summary.output_dimensions.0).bold(),
        style(summary.output_dimensions.1).bold()
    );
    println!(
        "  Frame duration: {}ms ({})",
        summary.duration_ms,
        describe_repeat(summary.repeat)
    );

    match (
        std::fs::metadata(&summary.input_path),
        std::fs::metadata(&summary.output_path),
    ) {
        (Ok(input_meta), Ok(output_meta)) => {
            println!(
                "  File size: {} -> {}",
                format_file_size(input_meta.len()),
                style(format_file_size(output_meta.len())).bold()
            );
        }
        _ => verbose_println(args.verbose, "Could not read file sizes for summary"),
    }

    println!(
        "  Processing time: {}",
        style(format_duration(summary.processing_time)).dim()
    );

    println!();
    println!(
        "{} {}",
        style("Successfully saved cropped GIF to").green(),
        style(summary.output_path.display()).bold().green()
    );
}
