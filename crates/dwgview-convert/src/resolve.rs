//! 颜色解析
//!
//! 把实体上的颜色说明（ByLayer/ByBlock/直接RGB）解析为
//! 最终显示颜色。纯函数，任何输入都有确定的返回值。

use dwgview_core::color::{ColorSpec, Rgb};
use dwgview_core::document::CadDocument;
use dwgview_core::entity::CadEntity;

/// 无法解析时的回退颜色
const FALLBACK: Rgb = Rgb::WHITE;

/// 解析实体的有效显示颜色
///
/// - ByLayer：取实体所在图层的颜色，图层缺失时回退白色
/// - ByBlock：回退白色（块颜色继承未实现，见DESIGN.md）
/// - 直接RGB：原样返回
pub fn resolve_color(entity: &CadEntity, doc: &CadDocument) -> Rgb {
    match entity.color {
        ColorSpec::ByLayer => entity
            .layer
            .as_deref()
            .and_then(|name| doc.layer(name))
            .map(|layer| layer.color)
            .unwrap_or(FALLBACK),
        ColorSpec::ByBlock => FALLBACK,
        ColorSpec::Rgb(rgb) => rgb,
    }
}

/// 颜色说明的方法名称（用于诊断属性输出）
pub fn color_method_name(color: &ColorSpec) -> &'static str {
    match color {
        ColorSpec::ByLayer => "ByLayer",
        ColorSpec::ByBlock => "ByBlock",
        ColorSpec::Rgb(_) => "Direct",
    }
}
