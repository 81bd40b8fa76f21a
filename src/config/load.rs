use crate::config::types::{Config, FormatTable, IdentifySettings};
use anyhow::{Context, Result};

/// 編譯時嵌入的格式表（不讀取外部設定檔）
const FORMAT_TABLE_JSON: &str = include_str!("../data/format_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self {
            format_table: Self::load_embedded_format_table()?,
            identify: IdentifySettings::default(),
        })
    }

    #[must_use]
    pub fn with_identify(mut self, identify: IdentifySettings) -> Self {
        self.identify = identify;
        self
    }

    fn load_embedded_format_table() -> Result<FormatTable> {
        serde_json::from_str(FORMAT_TABLE_JSON).context("無法解析嵌入的圖片格式表")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatCheck;
    use std::path::Path;

    #[test]
    fn test_embedded_table_loads() {
        let config = Config::new().unwrap();
        assert_eq!(config.format_table.supported_image.len(), 3);
        assert_eq!(config.format_table.unsupported_image.len(), 5);
        assert_eq!(config.identify.program, "identify");
    }

    #[test]
    fn test_is_supported_ignores_case() {
        let table = Config::new().unwrap().format_table;
        assert!(table.is_supported("wall.jpg"));
        assert!(table.is_supported("wall.JPEG"));
        assert!(table.is_supported("wall.Png"));
        assert!(!table.is_supported("wall.webp"));
        assert!(!table.is_supported("README"));
    }

    #[test]
    fn test_check_format_warn_vs_silent() {
        let table = Config::new().unwrap().format_table;
        assert_eq!(
            table.check_format(Path::new("a.webp")),
            FormatCheck::KnownUnsupported
        );
        assert_eq!(
            table.check_format(Path::new("a.TIFF")),
            FormatCheck::KnownUnsupported
        );
        assert_eq!(table.check_format(Path::new("a.txt")), FormatCheck::Unknown);
        assert_eq!(table.check_format(Path::new(".bashrc")), FormatCheck::Unknown);
        assert_eq!(
            table.check_format(Path::new("archive.tar.png")),
            FormatCheck::Supported
        );
    }
}
