use super::resolution_sorter::{FileOutcome, ResolutionSorter, RunStats};
use crate::config::{Config, FormatTable};
use crate::tools::{DimensionReader, FileEntry, IdentifyReader, validate_directory_exists};
use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

const INSTALL_HINT: &str = "Please install ImageMagick: sudo apt install imagemagick";

/// 依解析度自動整理桌布元件
pub struct AutoMoveByResolution<P: DimensionReader = IdentifyReader> {
    sorter: ResolutionSorter<P>,
}

impl AutoMoveByResolution<IdentifyReader> {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let reader = IdentifyReader::new(config.identify);
        Self::with_reader(config.format_table, reader)
    }
}

impl<P: DimensionReader> AutoMoveByResolution<P> {
    pub fn with_reader(format_table: FormatTable, reader: P) -> Self {
        Self {
            sorter: ResolutionSorter::new(format_table, reader),
        }
    }

    /// 驗證目錄與外部工具後整理檔案；只有前置檢查失敗會回傳錯誤
    pub fn run(&self, directory: &Path) -> Result<RunStats> {
        validate_directory_exists(directory)?;

        if let Err(e) = self.sorter.reader().check_available() {
            warn!("identify 無法使用: {e:#}");
            bail!("ImageMagick 'identify' command not found.\n{INSTALL_HINT}");
        }

        let absolute = std::path::absolute(directory).unwrap_or_else(|_| directory.to_path_buf());
        println!("Organizing wallpapers in: {}", absolute.display());
        info!("開始整理: {}", absolute.display());

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .expect("Invalid progress bar template"),
        );
        progress_bar.set_message("organizing...");

        let stats = self.sorter.sort_directory(directory, |entry, outcome| {
            progress_bar.suspend(|| Self::print_outcome(entry, outcome));
            progress_bar.inc(1);
        })?;

        progress_bar.finish_and_clear();
        Self::print_result(&stats);

        Ok(stats)
    }

    fn print_outcome(entry: &FileEntry, outcome: &FileOutcome) {
        let name = entry.display_name();

        match outcome {
            FileOutcome::Moved {
                dimensions,
                label,
                destination,
                renamed,
            } => {
                if *renamed {
                    let new_name = destination
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    println!(
                        "{} File renamed to avoid conflict: {} -> {}",
                        style("Warning:").yellow(),
                        name,
                        new_name
                    );
                }
                println!(
                    "{} {} ({}) -> {}/",
                    style("Moved:").green(),
                    name,
                    dimensions,
                    style(label).cyan()
                );
            }
            FileOutcome::Skipped { warned: true } => {
                println!(
                    "{} Skipping unsupported format: {}",
                    style("Warning:").yellow(),
                    name
                );
            }
            FileOutcome::Skipped { warned: false } => {}
            FileOutcome::Unreadable { .. } => {
                println!(
                    "{} Could not read dimensions for {} (corrupted or unsupported)",
                    style("Warning:").yellow(),
                    name
                );
            }
            FileOutcome::MoveFailed { error, .. } => {
                println!("{} {}: {:#}", style("Error moving").red(), name, error);
            }
        }
    }

    fn print_result(stats: &RunStats) {
        println!();
        println!("{}", style("Summary:").cyan().bold());
        println!("  Processed: {} files", style(stats.processed).green());
        println!("  Skipped: {} files", style(stats.skipped).yellow());
        println!("  Errors: {} files", style(stats.errors).red());

        if !stats.label_counts.is_empty() {
            println!();
            println!("{}", style("Resolution breakdown:").dim());

            let mut sorted_counts: Vec<_> = stats.label_counts.iter().collect();
            sorted_counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

            for (label, count) in sorted_counts {
                println!("  {} {}/: {}", style("•").dim(), label, count);
            }
        }
    }
}
