//! 颜色定义
//!
//! CAD实体的颜色可以直接指定RGB，也可以间接跟随图层（ByLayer）
//! 或跟随所在块（ByBlock），后两者需要在转换时解析。

use serde::{Deserialize, Serialize};

/// RGB颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 转换为线格式数组 [r, g, b]
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    // 预定义颜色（AutoCAD ACI颜色兼容）
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// 颜色说明
///
/// 实体上存储的是"颜色说明"而不是最终显示颜色，
/// ByLayer/ByBlock 的解析由转换引擎完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorSpec {
    /// 跟随图层
    #[default]
    ByLayer,
    /// 跟随块
    ByBlock,
    /// 直接指定RGB
    Rgb(Rgb),
}

impl ColorSpec {
    pub fn is_by_layer(&self) -> bool {
        matches!(self, ColorSpec::ByLayer)
    }

    pub fn is_by_block(&self) -> bool {
        matches!(self, ColorSpec::ByBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_spec() {
        assert!(ColorSpec::ByLayer.is_by_layer());
        assert!(ColorSpec::ByBlock.is_by_block());
        assert!(!ColorSpec::Rgb(Rgb::RED).is_by_layer());
        assert_eq!(Rgb::new(10, 20, 30).to_array(), [10, 20, 30]);
    }
}
