/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 图描述符（Graph Descriptor）
 *                 层图的可序列化快照，用于调试输出与摘要表格
 */

use serde::{Deserialize, Serialize};

/// 层图的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 图名称
    pub name: String,
    /// 所有层（按构造顺序）
    pub layers: Vec<LayerDescriptor>,
    /// 所有权重（按构造顺序）
    pub weights: Vec<WeightsDescriptor>,
}

/// 层描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: usize,
    pub name: String,
    /// 层种类（schema 中的消息类型名）
    pub layer_type: String,
    pub data_layout: String,
    /// 父层 ID 列表（定义拓扑）
    pub parents: Vec<usize>,
    /// 引用的权重名
    pub weights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_layer: Option<String>,
    /// 已设置的 schema 字段名
    pub set_fields: Vec<String>,
}

/// 权重描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsDescriptor {
    pub id: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl GraphDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            layers: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer: LayerDescriptor) {
        self.layers.push(layer);
    }

    pub fn add_weights(&mut self, weights: WeightsDescriptor) {
        self.weights.push(weights);
    }

    /// 按 ID 查找层名
    pub fn layer_name(&self, id: usize) -> Option<&str> {
        self.layers
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.as_str())
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
