//! 依解析度自動整理桌布元件
//!
//! 讀取資料夾第一層的圖片尺寸，依解析度移動到對應的資料夾

mod main;
mod resolution_classifier;
mod resolution_sorter;

pub use main::AutoMoveByResolution;
pub use resolution_classifier::{
    RESOLUTION_TABLE, ResolutionLabel, ResolutionRule, classify, classify_dimensions,
};
pub use resolution_sorter::{FileOutcome, ResolutionSorter, RunStats};
