//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod auto_move_by_resolution;

pub use auto_move_by_resolution::AutoMoveByResolution;
