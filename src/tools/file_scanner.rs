use anyhow::{Context, Result};
use log::warn;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 目錄第一層的檔案
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: OsString,
}

impl FileEntry {
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().to_string()
    }
}

/// 只掃描目錄第一層的檔案（不遞迴），依檔名排序
pub fn scan_root_files(directory: &Path) -> Result<Vec<FileEntry>> {
    // 根目錄無法讀取時直接回報錯誤
    std::fs::read_dir(directory)
        .with_context(|| format!("無法讀取目錄: {}", directory.display()))?;

    let files = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("讀取目錄項目失敗: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| FileEntry {
            name: entry.file_name().to_owned(),
            path: entry.into_path(),
        })
        .collect();

    Ok(files)
}
