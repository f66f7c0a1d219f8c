/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 句柄（用户级 API）
 */

use super::inner::GraphInner;
use crate::errors::ProtoError;
use crate::nn::callback::Callback;
use crate::nn::config::ExportConfig;
use crate::nn::descriptor::GraphDescriptor;
use crate::nn::layer::{Layer, LayerArgs};
use crate::nn::model_parts::ModelParts;
use crate::nn::node_class::FieldArgs;
use crate::nn::weights::{Initializer, WeightsArgs};
use crate::nn::{LayerId, WeightsId};
use crate::proto::Document;
use crate::schema::SchemaRegistry;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Graph - 层图句柄
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Layer 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    /// 使用内置 schema 创建新图
    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    pub fn with_name(name: &str) -> Self {
        Self::from_inner(GraphInner::with_name(name))
    }

    /// 使用外部提供的 schema 创建新图
    pub fn with_schema(schema: Rc<dyn SchemaRegistry>) -> Self {
        Self::from_inner(GraphInner::with_schema(schema))
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 将 LayerId 包装成 Layer
    pub fn wrap_layer_id(&self, id: LayerId) -> Result<Layer, ProtoError> {
        self.inner.borrow().get_layer(id)?;
        Ok(Layer::new(id, Rc::clone(&self.inner)))
    }

    // ==================== 创建节点 ====================

    /// 创建层（`type_name`为 schema 中的层种类，如 `FullyConnected`）
    pub fn layer(&self, type_name: &str, args: LayerArgs) -> Result<Layer, ProtoError> {
        let id = self.inner.borrow_mut().new_layer(type_name, args)?;
        Ok(Layer::new(id, Rc::clone(&self.inner)))
    }

    pub fn initializer(&self, type_name: &str, args: &FieldArgs) -> Result<Initializer, ProtoError> {
        self.inner.borrow_mut().new_initializer(type_name, args)
    }

    pub fn weights(&self, name: &str, args: WeightsArgs) -> Result<WeightsId, ProtoError> {
        self.inner.borrow_mut().new_weights(name, args)
    }

    pub fn callback(&self, type_name: &str, args: &FieldArgs) -> Result<Callback, ProtoError> {
        self.inner.borrow_mut().new_callback(type_name, args)
    }

    // ==================== 导出 ====================

    pub fn build_document(
        &self,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
        config: &ExportConfig,
    ) -> Result<Document, ProtoError> {
        self.inner
            .borrow()
            .build_document(mini_batch_size, epochs, parts, config)
    }

    pub fn save_model<P: AsRef<Path>>(
        &self,
        path: P,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
    ) -> Result<(), ProtoError> {
        self.inner
            .borrow()
            .save_model(path, mini_batch_size, epochs, parts)
    }

    pub fn save_model_with_config<P: AsRef<Path>>(
        &self,
        path: P,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
        config: &ExportConfig,
    ) -> Result<(), ProtoError> {
        self.inner
            .borrow()
            .save_model_with_config(path, mini_batch_size, epochs, parts, config)
    }

    // ==================== 描述 ====================

    pub fn describe(&self) -> GraphDescriptor {
        self.inner.borrow().describe()
    }

    pub fn summary_string(&self) -> String {
        self.inner.borrow().summary_string()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
