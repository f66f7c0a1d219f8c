/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 层的构造参数（LayerArgs）与层句柄（Layer）
 *
 * `Layer` 是 `LayerId` + 图引用的薄封装，支持链式建图：
 * ```ignore
 * let x = graph.layer("Input", LayerArgs::new().name("data"))?;
 * let fc = graph.layer("FullyConnected", LayerArgs::new().field("num_neurons", 10))?;
 * fc.call(&x)?;          // 等价于 fc.add_parent(&x)
 * ```
 */

use super::graph::GraphInner;
use super::node_class::FieldArgs;
use super::{DataLayout, LayerId, WeightsId};
use crate::errors::ProtoError;
use crate::proto::FieldArg;
use std::cell::RefCell;
use std::rc::Rc;

// ==================== LayerArgs ====================

/// 层的构造参数
///
/// 结构性参数（名称、数据布局、提示层、父/子层、权重）之外的参数都是 schema 字段，
/// 通过 `field()` 给出；字段名不在该层类型的 schema 中时，构造会失败。
#[derive(Debug, Clone, Default)]
pub struct LayerArgs {
    pub(crate) name: Option<String>,
    pub(crate) data_layout: DataLayout,
    pub(crate) hint_layer: Option<LayerId>,
    pub(crate) parents: Vec<LayerId>,
    pub(crate) children: Vec<LayerId>,
    pub(crate) weights: Vec<WeightsId>,
    pub(crate) fields: FieldArgs,
}

impl LayerArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 层名；为空时自动生成 `layer<N>`
    pub fn name(mut self, name: &str) -> Self {
        self.name = (!name.is_empty()).then(|| name.to_string());
        self
    }

    pub const fn data_layout(mut self, data_layout: DataLayout) -> Self {
        self.data_layout = data_layout;
        self
    }

    pub fn hint_layer(mut self, layer: impl Into<LayerId>) -> Self {
        self.hint_layer = Some(layer.into());
        self
    }

    pub fn parent(mut self, layer: impl Into<LayerId>) -> Self {
        self.parents.push(layer.into());
        self
    }

    pub fn parents<I, L>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LayerId>,
    {
        self.parents.extend(layers.into_iter().map(Into::into));
        self
    }

    pub fn child(mut self, layer: impl Into<LayerId>) -> Self {
        self.children.push(layer.into());
        self
    }

    pub fn weights(mut self, weights: WeightsId) -> Self {
        self.weights.push(weights);
        self
    }

    /// schema 字段（单值或序列）
    pub fn field(mut self, name: &str, value: impl Into<FieldArg>) -> Self {
        self.fields.set(name, value);
        self
    }

    pub fn fields(mut self, fields: FieldArgs) -> Self {
        for (name, value) in fields.iter() {
            self.fields.set(name, value.clone());
        }
        self
    }
}

// ==================== Layer 句柄 ====================

/// 层句柄：携带图引用，便于链式建图
#[derive(Clone)]
pub struct Layer {
    id: LayerId,
    graph: Rc<RefCell<GraphInner>>,
}

impl Layer {
    pub(crate) const fn new(id: LayerId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn id(&self) -> LayerId {
        self.id
    }

    /// 两个句柄须属于同一张图
    fn check_same_graph(&self, other: &Self) -> Result<(), ProtoError> {
        if Rc::ptr_eq(&self.graph, &other.graph) {
            Ok(())
        } else {
            Err(ProtoError::LayerNotFound(other.id))
        }
    }

    pub fn name(&self) -> Result<String, ProtoError> {
        Ok(self.graph.borrow().layer_name(self.id)?.to_string())
    }

    pub fn type_name(&self) -> Result<String, ProtoError> {
        Ok(self.graph.borrow().layer_type(self.id)?.to_string())
    }

    pub fn parents(&self) -> Result<Vec<LayerId>, ProtoError> {
        Ok(self.graph.borrow().layer_parents(self.id)?.to_vec())
    }

    pub fn children(&self) -> Result<Vec<LayerId>, ProtoError> {
        Ok(self.graph.borrow().layer_children(self.id)?.to_vec())
    }

    /// 本层接收`parent`的输出
    pub fn add_parent(&self, parent: &Self) -> Result<(), ProtoError> {
        self.check_same_graph(parent)?;
        self.graph.borrow_mut().add_parent(self.id, parent.id)
    }

    /// 本层的输出送往`child`
    pub fn add_child(&self, child: &Self) -> Result<(), ProtoError> {
        self.check_same_graph(child)?;
        self.graph.borrow_mut().add_child(self.id, child.id)
    }

    pub fn add_weights(&self, weights: WeightsId) -> Result<(), ProtoError> {
        self.graph.borrow_mut().add_weights(self.id, weights)
    }

    /// 以`parent`为输入“调用”本层，即`add_parent`；返回本层句柄以便链式书写
    pub fn call(&self, parent: &Self) -> Result<Self, ProtoError> {
        self.add_parent(parent)?;
        Ok(self.clone())
    }

    /// 设置 schema 字段
    pub fn set(&self, field: &str, value: impl Into<FieldArg>) -> Result<(), ProtoError> {
        self.graph.borrow_mut().set_layer_field(self.id, field, value)
    }

    /// 读取 schema 字段（未设置时为 None）
    pub fn get(&self, field: &str) -> Result<Option<FieldArg>, ProtoError> {
        Ok(self.graph.borrow().layer_field(self.id, field)?.cloned())
    }

    /// 将 schema 字段恢复为未设置
    pub fn clear(&self, field: &str) -> Result<(), ProtoError> {
        self.graph.borrow_mut().clear_layer_field(self.id, field)
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer").field("id", &self.id).finish()
    }
}

impl From<&Layer> for LayerId {
    fn from(layer: &Layer) -> Self {
        layer.id
    }
}

impl From<Layer> for LayerId {
    fn from(layer: Layer) -> Self {
        layer.id
    }
}
