/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : GraphInner 层图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建、访问器、连边、字段赋值
 * - node_builders.rs: new_layer/new_weights/new_initializer/new_callback
 * - traverse.rs: 拓扑遍历（父层先于子层）
 * - export.rs: 导出各节点并组装成文档，save_model
 * - describe.rs: describe/summary
 */

mod core;
mod describe;
mod export;
mod node_builders;
mod traverse;

pub use traverse::Traversal;

use super::types::{GraphId, LayerNode, WeightsNode};
use crate::nn::node_class::NodeClasses;
use crate::schema::SchemaRegistry;
use std::rc::Rc;

/// 层图的完整定义（核心实现）
///
/// 层与权重都存放在图内的表中，对外只暴露句柄（`LayerId` / `WeightsId`）。
/// 用户通常通过 `Graph` 句柄使用此结构。
pub struct GraphInner {
    /// 本图签发的句柄都带有此标识
    pub(in crate::nn::graph) id: GraphId,
    pub(in crate::nn::graph) name: String,
    pub(in crate::nn::graph) schema: Rc<dyn SchemaRegistry>,
    /// 已生成的节点类（按需生成并缓存）
    pub(in crate::nn::graph) classes: NodeClasses,
    pub(in crate::nn::graph) layers: Vec<LayerNode>,
    pub(in crate::nn::graph) weights: Vec<WeightsNode>,
    /// 默认层名 `layer<N>` 的计数器（最近一次占用的序号，只增不减）
    pub(in crate::nn::graph) num_layers: usize,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphInner")
            .field("name", &self.name)
            .field("layers", &self.layers.len())
            .field("weights", &self.weights.len())
            .field("num_layers", &self.num_layers)
            .finish()
    }
}
