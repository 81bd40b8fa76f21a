//! 解析度分類
//!
//! 以精確的寬高比對決定資料夾名稱，不做比例或誤差判斷

use crate::tools::Dimensions;
use std::fmt;

/// 解析度分類標籤，同時也是目標資料夾名稱
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionLabel {
    P1080,
    P1440,
    K4,
    P1440Ultrawide,
    P1080Ultrawide,
    K4Ultrawide,
    P768,
    P900,
    P1050,
    P1152,
    Other,
}

impl ResolutionLabel {
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            Self::P1080 => "1080p",
            Self::P1440 => "1440p",
            Self::K4 => "4k",
            Self::P1440Ultrawide => "1440p_ultrawide",
            Self::P1080Ultrawide => "1080p_ultrawide",
            Self::K4Ultrawide => "4k_ultrawide",
            Self::P768 => "768p",
            Self::P900 => "900p",
            Self::P1050 => "1050p",
            Self::P1152 => "1152p",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn all_labels() -> [Self; 11] {
        [
            Self::P1080,
            Self::P1440,
            Self::K4,
            Self::P1440Ultrawide,
            Self::P1080Ultrawide,
            Self::K4Ultrawide,
            Self::P768,
            Self::P900,
            Self::P1050,
            Self::P1152,
            Self::Other,
        ]
    }
}

impl fmt::Display for ResolutionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// 解析度對照表的一列
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRule {
    pub width: u32,
    pub height: u32,
    pub label: ResolutionLabel,
    /// 是否也接受直向（寬高互換）
    pub swap_allowed: bool,
}

impl ResolutionRule {
    const fn new(width: u32, height: u32, label: ResolutionLabel, swap_allowed: bool) -> Self {
        Self {
            width,
            height,
            label,
            swap_allowed,
        }
    }

    #[must_use]
    pub const fn matches(&self, width: u32, height: u32) -> bool {
        (self.width == width && self.height == height)
            || (self.swap_allowed && self.width == height && self.height == width)
    }
}

/// 依序比對的解析度表
///
/// 只有前三種標準 16:9 解析度接受直向；寬螢幕與其他常見解析度沒有直向規則，
/// 直向的這些尺寸會落入 `other`。
pub const RESOLUTION_TABLE: [ResolutionRule; 10] = [
    ResolutionRule::new(1920, 1080, ResolutionLabel::P1080, true),
    ResolutionRule::new(2560, 1440, ResolutionLabel::P1440, true),
    ResolutionRule::new(3840, 2160, ResolutionLabel::K4, true),
    ResolutionRule::new(3440, 1440, ResolutionLabel::P1440Ultrawide, false),
    ResolutionRule::new(2560, 1080, ResolutionLabel::P1080Ultrawide, false),
    ResolutionRule::new(5120, 2160, ResolutionLabel::K4Ultrawide, false),
    ResolutionRule::new(1366, 768, ResolutionLabel::P768, false),
    ResolutionRule::new(1600, 900, ResolutionLabel::P900, false),
    ResolutionRule::new(1680, 1050, ResolutionLabel::P1050, false),
    ResolutionRule::new(2048, 1152, ResolutionLabel::P1152, false),
];

#[must_use]
pub fn classify(width: u32, height: u32) -> ResolutionLabel {
    RESOLUTION_TABLE
        .iter()
        .find(|rule| rule.matches(width, height))
        .map_or(ResolutionLabel::Other, |rule| rule.label)
}

#[must_use]
pub fn classify_dimensions(dimensions: Dimensions) -> ResolutionLabel {
    classify(dimensions.width, dimensions.height)
}
