//! CAD文档数据模型
//!
//! 解码器输出的只读对象图：实体列表、图层表、线型表和块表。
//! 转换引擎只读取文档，不会修改它。

use crate::color::Rgb;
use crate::entity::CadEntity;
use crate::math::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 图层定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// 图层名称
    pub name: String,
    /// 句柄
    pub handle: String,
    /// 图层颜色
    pub color: Rgb,
    /// 是否打开（关闭的图层不显示）
    pub is_on: bool,
    /// 是否冻结
    pub is_frozen: bool,
}

impl Layer {
    /// 创建新图层
    pub fn new(name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            color: Rgb::WHITE,
            is_on: true,
            is_frozen: false,
        }
    }

    /// 设置颜色
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// 线型定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Linetype {
    /// 线型名称
    pub name: String,
    /// 描述文本
    pub description: String,
    /// 线型模式（正数表示画线，负数表示空白）
    pub pattern: Vec<f64>,
}

impl Linetype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            pattern: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: Vec<f64>) -> Self {
        self.pattern = pattern;
        self
    }
}

/// 块定义
///
/// 一组定义在块自身坐标系中的实体，由 Insert 实体实例化。
/// 标注实体的渲染内容也存放在匿名块中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// 块名称（文档内唯一）
    pub name: String,
    /// 基点（插入点的参考原点）
    pub origin: Point3,
    /// 块中的实体
    pub entities: Vec<CadEntity>,
}

impl Block {
    /// 创建新块
    pub fn new(name: impl Into<String>, origin: Point3) -> Self {
        Self {
            name: name.into(),
            origin,
            entities: Vec::new(),
        }
    }

    /// 添加实体到块
    pub fn add_entity(&mut self, entity: CadEntity) {
        self.entities.push(entity);
    }
}

/// CAD文档
///
/// 解码后的完整对象图。一次转换调用对应一个文档，
/// 文档之间不共享任何状态。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadDocument {
    /// 模型空间实体
    pub entities: Vec<CadEntity>,
    /// 图层表
    pub layers: Vec<Layer>,
    /// 线型表
    pub linetypes: Vec<Linetype>,
    /// 块表（按名称索引）
    pub blocks: HashMap<String, Block>,
}

impl CadDocument {
    /// 创建空文档
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加实体
    pub fn add_entity(&mut self, entity: CadEntity) {
        self.entities.push(entity);
    }

    /// 按名称查找图层
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// 按名称查找线型
    pub fn linetype(&self, name: &str) -> Option<&Linetype> {
        self.linetypes.iter().find(|l| l.name == name)
    }

    /// 按名称查找块定义
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    /// 添加块定义
    pub fn add_block(&mut self, block: Block) -> bool {
        if self.blocks.contains_key(&block.name) {
            false
        } else {
            self.blocks.insert(block.name.clone(), block);
            true
        }
    }

    /// 实体数量
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
