use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::Args;
use crate::error::{GifCropError, Result};
use crate::gif_processing::crop;

/// Create a styled spinner for per-frame progress
pub fn create_frame_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Format a byte count for the results summary
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Validate command line arguments before touching the decoder
pub fn validate_inputs(args: &Args) -> Result<()> {
    if !args.input.exists() || !args.input.is_file() {
        return Err(GifCropError::FileNotFound(args.input.clone()));
    }

    crop::validate_dimensions(&args.crop_box())?;

    Ok(())
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print error message
pub fn error_println(message: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KiB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_validate_inputs_missing_file() {
        let args = Args::for_tests("definitely/not/a/file.gif");
        let err = validate_inputs(&args).unwrap_err();
        assert!(matches!(err, GifCropError::FileNotFound(_)));
    }

    #[test]
    fn test_validate_inputs_bad_box() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.gif");
        std::fs::write(&input, b"not really a gif").unwrap();

        let mut args = Args::for_tests(input.to_str().unwrap());
        args.left = 5;
        args.right = 5;
        let err = validate_inputs(&args).unwrap_err();
        assert!(matches!(err, GifCropError::InvalidDimensions(_)));
    }
}
