//! DWGView实体→几何转换引擎
//!
//! 将解码后的CAD对象图（`dwgview-core`）转换为渲染就绪的
//! 几何+属性树。纯同步内存变换：不解码文件字节、不做网络IO、
//! 不渲染像素、不持久化状态。
//!
//! # 数据流
//!
//! `document::parse` → 逐实体 `convert::convert_entity` →
//! 颜色解析(`resolve`) + 类型分派 → 填充/面域走边界环构建
//! (`boundary`) → 曲线采样(`sampler`)。Insert和标注会递归
//! 展开所引用块的内容。
//!
//! # 使用
//!
//! ```
//! use dwgview_convert::document::parse;
//! use dwgview_core::document::CadDocument;
//!
//! let doc = CadDocument::new();
//! let result = parse(&doc);
//! assert_eq!(result.metadata.total_found, 0);
//! ```

pub mod boundary;
pub mod convert;
pub mod document;
pub mod output;
pub mod resolve;
pub mod sampler;
pub mod text;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::convert::convert_entity;
    pub use crate::document::parse;
    pub use crate::output::{ConvertedEntity, DocumentResult, Geometry, Metadata};
}
