/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 负责模型描述的构建：层图、权重、目标函数、指标、回调及其导出
 */

mod callback;
mod config;
mod descriptor;
mod graph;
mod layer;
mod metric;
mod model_parts;
pub mod node_class;
mod objective;
mod weights;

pub use callback::Callback;
pub use config::ExportConfig;
pub use descriptor::{GraphDescriptor, LayerDescriptor, WeightsDescriptor};
pub use graph::{DataLayout, Graph, GraphInner, LayerId, Traversal, WeightsId};
pub use layer::{Layer, LayerArgs};
pub use metric::Metric;
pub use model_parts::ModelParts;
pub use node_class::{FieldArgs, NodeClass, NodeClasses, NodeFamily, SchemaNode};
pub use objective::{
    L2WeightRegularization, LayerTerm, ObjectiveFunction, ObjectiveFunctionTerm, TraitForTerm,
};
pub use weights::{Initializer, Optimizer, WeightsArgs};

#[cfg(test)]
mod tests;
