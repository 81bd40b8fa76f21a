use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// 預設的圖片尺寸查詢程式（ImageMagick）
const DEFAULT_IDENTIFY_PROGRAM: &str = "identify";

/// 單一檔案讀取尺寸的逾時
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// 啟動前檢查 identify 是否可用的逾時
const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// 副檔名判斷結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCheck {
    /// 支援的點陣圖格式
    Supported,
    /// 已知的圖片格式，但不處理（需要警告）
    KnownUnsupported,
    /// 其他檔案，直接略過
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatTable {
    #[serde(rename = "SUPPORTED_IMAGE")]
    pub supported_image: Vec<String>,
    #[serde(rename = "UNSUPPORTED_IMAGE")]
    pub unsupported_image: Vec<String>,
}

impl FormatTable {
    #[must_use]
    pub fn supported_extensions_set(&self) -> HashSet<String> {
        self.supported_image
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn unsupported_extensions_set(&self) -> HashSet<String> {
        self.unsupported_image
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    /// 依小寫副檔名判斷檔案格式
    #[must_use]
    pub fn check_format(&self, path: &Path) -> FormatCheck {
        let Some(ext) = Self::dotted_extension(path) else {
            return FormatCheck::Unknown;
        };

        if self.supported_extensions_set().contains(&ext) {
            FormatCheck::Supported
        } else if self.unsupported_extensions_set().contains(&ext) {
            FormatCheck::KnownUnsupported
        } else {
            FormatCheck::Unknown
        }
    }

    #[must_use]
    pub fn is_supported(&self, name: &str) -> bool {
        self.check_format(Path::new(name)) == FormatCheck::Supported
    }

    fn dotted_extension(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }
}

/// 外部尺寸查詢程式的設定
#[derive(Debug, Clone)]
pub struct IdentifySettings {
    pub program: String,
    pub read_timeout: Duration,
    pub version_timeout: Duration,
}

impl Default for IdentifySettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_IDENTIFY_PROGRAM.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
        }
    }
}

impl IdentifySettings {
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub format_table: FormatTable,
    pub identify: IdentifySettings,
}
