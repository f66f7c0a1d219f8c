/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 权重（Weights）的构造参数、初始化器与优化器占位
 */

use super::node_class::{FieldArgs, SchemaNode};
use crate::errors::ProtoError;
use crate::proto::Message;
use crate::schema::SchemaRegistry;

/// 权重初始化器：由 schema 中 Weights 消息的初始化器字段生成
///
/// 例如 `ConstantInitializer`、`HeNormalInitializer` 等。
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer(pub(crate) SchemaNode);

impl Initializer {
    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn node(&self) -> &SchemaNode {
        &self.0
    }

    pub fn node_mut(&mut self) -> &mut SchemaNode {
        &mut self.0
    }

    /// 写入 Weights 消息中对应的初始化器槽位
    pub fn export_into(
        &self,
        schema: &dyn SchemaRegistry,
        weights: &mut Message,
    ) -> Result<(), ProtoError> {
        self.0.export_into(schema, weights)
    }
}

/// 优化器（预留）
///
/// 目前只支持引擎的默认优化器：给权重指定任何优化器都会在导出时报`Unsupported`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optimizer {
    pub type_name: String,
    pub args: FieldArgs,
}

impl Optimizer {
    pub fn new(type_name: &str, args: FieldArgs) -> Self {
        Self {
            type_name: type_name.to_string(),
            args,
        }
    }
}

/// 权重构造参数
#[derive(Debug, Clone, Default)]
pub struct WeightsArgs {
    pub(crate) initializer: Option<Initializer>,
    pub(crate) optimizer: Option<Optimizer>,
}

impl WeightsArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = Some(optimizer);
        self
    }
}
