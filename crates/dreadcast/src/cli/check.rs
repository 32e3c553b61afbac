//! Self-check command handler.

use super::commands::OutputFormat;
use super::print_json;
use dreadcast::{CheckStatus, DreadcastConfig, DreadcastResult, FfmpegEncoder, self_check};

/// Run the self-check and print the report. Returns whether it passed.
pub async fn run_check(config: &DreadcastConfig, format: OutputFormat) -> DreadcastResult<bool> {
    let encoder = FfmpegEncoder::new(config.video.clone(), &config.paths.video_dir);
    let report = self_check(config, &encoder).await;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => {
            for item in &report.items {
                let marker = match item.status {
                    CheckStatus::Ok => "ok  ",
                    CheckStatus::Warn => "warn",
                    CheckStatus::Fail => "FAIL",
                };
                println!("[{}] {:<12} {}", marker, item.name, item.detail);
            }
            if report.passed() {
                println!("System ready.");
            } else {
                println!("Some checks failed.");
            }
        }
    }

    Ok(report.passed())
}
