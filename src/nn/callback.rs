/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 回调（Callback）：训练循环中的副作用钩子（打印、计时、存档等）
 *
 * 回调种类完全由 schema 中 Callback 消息的字段决定，与层种类使用同一套节点类生成算法，
 * 只是没有图的连边。
 */

use super::node_class::{FieldArgs, SchemaNode};
use super::{Graph, GraphInner};
use crate::errors::ProtoError;
use crate::proto::{FieldArg, Message};

#[derive(Debug, Clone, PartialEq)]
pub struct Callback(pub(crate) SchemaNode);

impl Callback {
    /// 创建回调，等价于`graph.callback(type_name, args)`
    pub fn new(graph: &Graph, type_name: &str, args: &FieldArgs) -> Result<Self, ProtoError> {
        graph.callback(type_name, args)
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn node(&self) -> &SchemaNode {
        &self.0
    }

    pub fn get(&self, field: &str) -> Result<Option<&FieldArg>, ProtoError> {
        self.0.get(field)
    }

    pub fn set(
        &mut self,
        graph: &GraphInner,
        field: &str,
        value: impl Into<FieldArg>,
    ) -> Result<(), ProtoError> {
        self.0.set(graph.schema(), field, value)
    }

    pub fn export_proto(&self, graph: &GraphInner) -> Result<Message, ProtoError> {
        self.0.export_proto(graph.schema())
    }
}
