//! 依解析度整理檔案
//!
//! 逐一處理目錄第一層的檔案：格式過濾、讀取尺寸、分類、移動。
//! 單一檔案的失敗只會記錄在統計中，不會中斷整個流程。

use super::resolution_classifier::{ResolutionLabel, classify_dimensions};
use crate::config::{FormatCheck, FormatTable};
use crate::tools::{
    DimensionReader, Dimensions, FileEntry, ensure_directory_exists, move_file,
    resolve_destination, scan_root_files,
};
use anyhow::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 單一檔案的處理結果
#[derive(Debug)]
pub enum FileOutcome {
    /// 已移動到解析度資料夾
    Moved {
        dimensions: Dimensions,
        label: ResolutionLabel,
        destination: PathBuf,
        /// 目標已有同名檔案，改用加上編號的名稱
        renamed: bool,
    },
    /// 不是支援的圖片格式
    Skipped {
        /// 已知的圖片格式才需要警告
        warned: bool,
    },
    /// 無法讀取尺寸
    Unreadable { error: anyhow::Error },
    /// 建立資料夾或移動時失敗
    MoveFailed {
        label: ResolutionLabel,
        error: anyhow::Error,
    },
}

/// 整理統計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// 成功移動的檔案數
    pub processed: usize,
    /// 略過的檔案數（非支援格式）
    pub skipped: usize,
    /// 讀取尺寸或移動失敗的檔案數
    pub errors: usize,
    /// 各解析度資料夾移入的檔案數
    pub label_counts: HashMap<ResolutionLabel, usize>,
}

impl RunStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Moved { label, .. } => {
                self.processed += 1;
                *self.label_counts.entry(*label).or_insert(0) += 1;
            }
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Unreadable { .. } | FileOutcome::MoveFailed { .. } => self.errors += 1,
        }
    }

    #[must_use]
    pub fn total_files(&self) -> usize {
        self.processed + self.skipped + self.errors
    }
}

/// 解析度整理器
pub struct ResolutionSorter<P: DimensionReader> {
    format_table: FormatTable,
    reader: P,
}

impl<P: DimensionReader> ResolutionSorter<P> {
    pub const fn new(format_table: FormatTable, reader: P) -> Self {
        Self {
            format_table,
            reader,
        }
    }

    pub fn reader(&self) -> &P {
        &self.reader
    }

    /// 整理目錄第一層的所有檔案，每處理完一個檔案就呼叫 `on_outcome`
    pub fn sort_directory<F>(&self, directory: &Path, mut on_outcome: F) -> Result<RunStats>
    where
        F: FnMut(&FileEntry, &FileOutcome),
    {
        let files = scan_root_files(directory)?;
        info!("掃描到 {} 個檔案: {}", files.len(), directory.display());

        let mut stats = RunStats::default();
        for entry in &files {
            let outcome = self.process_file(entry, directory);
            stats.record(&outcome);
            on_outcome(entry, &outcome);
        }

        info!(
            "解析度整理完成 - 共 {} 個檔案, 移動: {}, 略過: {}, 失敗: {}",
            stats.total_files(),
            stats.processed,
            stats.skipped,
            stats.errors
        );
        Ok(stats)
    }

    /// 處理單一檔案，所有錯誤都轉成 `FileOutcome`
    pub fn process_file(&self, entry: &FileEntry, base_dir: &Path) -> FileOutcome {
        match self.format_table.check_format(&entry.path) {
            FormatCheck::Supported => {}
            FormatCheck::KnownUnsupported => {
                debug!("略過不支援的圖片格式: {}", entry.path.display());
                return FileOutcome::Skipped { warned: true };
            }
            FormatCheck::Unknown => {
                debug!("略過非圖片檔案: {}", entry.path.display());
                return FileOutcome::Skipped { warned: false };
            }
        }

        let dimensions = match self.reader.read_dimensions(&entry.path) {
            Ok(dimensions) => dimensions,
            Err(error) => {
                debug!("無法讀取尺寸 {}: {error:#}", entry.path.display());
                return FileOutcome::Unreadable { error };
            }
        };

        let label = classify_dimensions(dimensions);
        let target_dir = base_dir.join(label.folder_name());

        match Self::move_into(entry, &target_dir) {
            Ok(destination) => {
                let renamed = destination.file_name() != Some(entry.name.as_os_str());
                debug!(
                    "移動檔案 ({dimensions}): {} -> {}",
                    entry.path.display(),
                    destination.display()
                );
                FileOutcome::Moved {
                    dimensions,
                    label,
                    destination,
                    renamed,
                }
            }
            Err(error) => FileOutcome::MoveFailed { label, error },
        }
    }

    fn move_into(entry: &FileEntry, target_dir: &Path) -> Result<PathBuf> {
        ensure_directory_exists(target_dir)?;
        let destination = resolve_destination(&target_dir.join(&entry.name));
        move_file(&entry.path, &destination)?;
        Ok(destination)
    }
}
