/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : GraphInner 核心操作：创建、访问器、连边、字段赋值
 */

use super::super::types::{GraphId, LayerNode, WeightsNode};
use super::GraphInner;
use crate::errors::ProtoError;
use crate::nn::node_class::NodeClasses;
use crate::nn::weights::Initializer;
use crate::nn::{DataLayout, LayerId, WeightsId};
use crate::proto::FieldArg;
use crate::schema::{Schema, SchemaRegistry};
use std::rc::Rc;

impl GraphInner {
    // ========== 创建 ==========

    /// 使用内置 schema 创建图
    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self::with_name_and_schema(name, Rc::new(Schema::builtin()))
    }

    /// 使用外部提供的 schema 创建图
    pub fn with_schema(schema: Rc<dyn SchemaRegistry>) -> Self {
        Self::with_name_and_schema("default_graph", schema)
    }

    pub fn with_name_and_schema(name: &str, schema: Rc<dyn SchemaRegistry>) -> Self {
        Self {
            id: GraphId::next(),
            name: name.to_string(),
            schema,
            classes: NodeClasses::new(),
            layers: Vec::new(),
            weights: Vec::new(),
            num_layers: 0,
        }
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &dyn SchemaRegistry {
        self.schema.as_ref()
    }

    pub fn schema_rc(&self) -> Rc<dyn SchemaRegistry> {
        Rc::clone(&self.schema)
    }

    /// 默认层名的计数器：每构造一个层至少前进 1，跳过已被显式占用的 `layer<N>`
    pub const fn num_layers(&self) -> usize {
        self.num_layers
    }

    pub fn layers_count(&self) -> usize {
        self.layers.len()
    }

    pub fn weights_count(&self) -> usize {
        self.weights.len()
    }

    /// 全部层句柄（构造顺序）
    pub fn layer_ids(&self) -> Vec<LayerId> {
        (0..self.layers.len()).map(|i| self.layer_id_at(i)).collect()
    }

    /// 全部权重句柄（构造顺序）
    pub fn weights_ids(&self) -> Vec<WeightsId> {
        (0..self.weights.len()).map(|i| self.weights_id_at(i)).collect()
    }

    pub(in crate::nn::graph) const fn layer_id_at(&self, index: usize) -> LayerId {
        LayerId {
            graph: self.id,
            index,
        }
    }

    pub(in crate::nn::graph) const fn weights_id_at(&self, index: usize) -> WeightsId {
        WeightsId {
            graph: self.id,
            index,
        }
    }

    // 其他图签发的句柄即使下标有效也视为不存在

    pub(in crate::nn) fn get_layer(&self, id: LayerId) -> Result<&LayerNode, ProtoError> {
        if id.graph != self.id {
            return Err(ProtoError::LayerNotFound(id));
        }
        self.layers.get(id.index).ok_or(ProtoError::LayerNotFound(id))
    }

    pub(in crate::nn) fn get_layer_mut(&mut self, id: LayerId) -> Result<&mut LayerNode, ProtoError> {
        if id.graph != self.id {
            return Err(ProtoError::LayerNotFound(id));
        }
        self.layers
            .get_mut(id.index)
            .ok_or(ProtoError::LayerNotFound(id))
    }

    pub(in crate::nn) fn get_weights(&self, id: WeightsId) -> Result<&WeightsNode, ProtoError> {
        if id.graph != self.id {
            return Err(ProtoError::WeightsNotFound(id));
        }
        self.weights.get(id.index).ok_or(ProtoError::WeightsNotFound(id))
    }

    pub(in crate::nn) fn get_weights_mut(
        &mut self,
        id: WeightsId,
    ) -> Result<&mut WeightsNode, ProtoError> {
        if id.graph != self.id {
            return Err(ProtoError::WeightsNotFound(id));
        }
        self.weights
            .get_mut(id.index)
            .ok_or(ProtoError::WeightsNotFound(id))
    }

    /// 按名称查找层
    pub fn find_layer(&self, name: &str) -> Option<LayerId> {
        self.layers
            .iter()
            .position(|l| l.name == name)
            .map(|i| self.layer_id_at(i))
    }

    /// 按名称查找权重（同名权重取最先构造的一个）
    pub fn find_weights(&self, name: &str) -> Option<WeightsId> {
        self.weights
            .iter()
            .position(|w| w.name == name)
            .map(|i| self.weights_id_at(i))
    }

    // ========== 层属性 ==========

    pub fn layer_name(&self, id: LayerId) -> Result<&str, ProtoError> {
        Ok(&self.get_layer(id)?.name)
    }

    /// 层种类（schema 中的消息类型名，如 `FullyConnected`）
    pub fn layer_type(&self, id: LayerId) -> Result<&str, ProtoError> {
        Ok(self.get_layer(id)?.kind.type_name())
    }

    pub fn layer_data_layout(&self, id: LayerId) -> Result<DataLayout, ProtoError> {
        Ok(self.get_layer(id)?.data_layout)
    }

    pub fn layer_parents(&self, id: LayerId) -> Result<&[LayerId], ProtoError> {
        Ok(&self.get_layer(id)?.parents)
    }

    pub fn layer_children(&self, id: LayerId) -> Result<&[LayerId], ProtoError> {
        Ok(&self.get_layer(id)?.children)
    }

    pub fn layer_weights(&self, id: LayerId) -> Result<&[WeightsId], ProtoError> {
        Ok(&self.get_layer(id)?.weights)
    }

    pub fn hint_layer(&self, id: LayerId) -> Result<Option<LayerId>, ProtoError> {
        Ok(self.get_layer(id)?.hint_layer)
    }

    /// schema 字段的当前取值（未设置时为 None）
    pub fn layer_field(&self, id: LayerId, field: &str) -> Result<Option<&FieldArg>, ProtoError> {
        self.get_layer(id)?.kind.get(field)
    }

    // ========== 权重属性 ==========

    pub fn weights_name(&self, id: WeightsId) -> Result<&str, ProtoError> {
        Ok(&self.get_weights(id)?.name)
    }

    pub fn weights_initializer(&self, id: WeightsId) -> Result<Option<&Initializer>, ProtoError> {
        Ok(self.get_weights(id)?.initializer.as_ref())
    }

    // ========== 连边 ==========

    /// `layer`接收`parent`的输出：同时登记 parent→layer 的子边
    ///
    /// 重复调用会产生重复的边（不做去重）。
    pub fn add_parent(&mut self, layer: LayerId, parent: LayerId) -> Result<(), ProtoError> {
        self.get_layer(parent)?;
        self.get_layer_mut(layer)?.parents.push(parent);
        self.get_layer_mut(parent)?.children.push(layer);
        Ok(())
    }

    /// `layer`的输出送往`child`：同时登记 child←layer 的父边
    pub fn add_child(&mut self, layer: LayerId, child: LayerId) -> Result<(), ProtoError> {
        self.get_layer(child)?;
        self.get_layer_mut(layer)?.children.push(child);
        self.get_layer_mut(child)?.parents.push(layer);
        Ok(())
    }

    /// 层引用一组权重（单向，权重不记录引用它的层）
    pub fn add_weights(&mut self, layer: LayerId, weights: WeightsId) -> Result<(), ProtoError> {
        self.get_weights(weights)?;
        self.get_layer_mut(layer)?.weights.push(weights);
        Ok(())
    }

    /// 以`parent`为输入调用`layer`，即`add_parent`；返回`layer`便于链式书写
    pub fn call(&mut self, layer: LayerId, parent: LayerId) -> Result<LayerId, ProtoError> {
        self.add_parent(layer, parent)?;
        Ok(layer)
    }

    pub fn set_hint_layer(&mut self, layer: LayerId, hint: Option<LayerId>) -> Result<(), ProtoError> {
        if let Some(hint) = hint {
            self.get_layer(hint)?;
        }
        self.get_layer_mut(layer)?.hint_layer = hint;
        Ok(())
    }

    pub fn set_data_layout(&mut self, layer: LayerId, data_layout: DataLayout) -> Result<(), ProtoError> {
        self.get_layer_mut(layer)?.data_layout = data_layout;
        Ok(())
    }

    // ========== 字段赋值 ==========

    /// 构造后直接给层的 schema 字段赋值（对照 schema 校验）
    pub fn set_layer_field(
        &mut self,
        layer: LayerId,
        field: &str,
        value: impl Into<FieldArg>,
    ) -> Result<(), ProtoError> {
        let schema = Rc::clone(&self.schema);
        self.get_layer_mut(layer)?
            .kind
            .set(schema.as_ref(), field, value)
    }

    /// 将层的 schema 字段恢复为未设置
    pub fn clear_layer_field(&mut self, layer: LayerId, field: &str) -> Result<(), ProtoError> {
        self.get_layer_mut(layer)?.kind.clear(field)
    }

    /// 替换权重的初始化器（None 表示交由引擎默认初始化）
    pub fn set_initializer(
        &mut self,
        weights: WeightsId,
        initializer: Option<Initializer>,
    ) -> Result<(), ProtoError> {
        self.get_weights_mut(weights)?.initializer = initializer;
        Ok(())
    }
}
