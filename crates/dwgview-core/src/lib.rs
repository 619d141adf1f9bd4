//! DWGView CAD对象图数据模型
//!
//! 表示解码器输出的内存对象图：实体、图层、线型和块定义。
//! 本crate不做任何文件解码，只定义转换引擎消费的只读数据结构。
//!
//! # 架构设计
//!
//! - `CadEntity`: 公共属性头 + 按类型区分的几何载荷（封闭枚举）
//! - `CadDocument`: 实体列表和图层/线型/块表
//! - `ColorSpec`: 直接RGB或ByLayer/ByBlock间接颜色

pub mod color;
pub mod document;
pub mod entity;
pub mod math;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::color::{ColorSpec, Rgb};
    pub use crate::document::{Block, CadDocument, Layer, Linetype};
    pub use crate::entity::{CadEntity, EntityKind};
    pub use crate::math::{Point2, Point3, Vector2, Vector3};
}
