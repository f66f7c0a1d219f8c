/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 指标（Metric）：从某个层读出的标量，只报告、不参与优化
 */

use super::{GraphInner, LayerId};
use crate::errors::ProtoError;
use crate::proto::Message;

/// 对应引擎中的“层指标”（layer metric）
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    layer: LayerId,
    /// 未指定时导出为层名
    name: Option<String>,
    unit: String,
}

impl Metric {
    pub fn new(layer: impl Into<LayerId>) -> Self {
        Self {
            layer: layer.into(),
            name: None,
            unit: String::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = (!name.is_empty()).then(|| name.to_string());
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub const fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// 指标名（未指定时为层名）
    pub fn name<'a>(&'a self, graph: &'a GraphInner) -> Result<&'a str, ProtoError> {
        match &self.name {
            Some(name) => Ok(name),
            None => graph.layer_name(self.layer),
        }
    }

    pub fn export_proto(&self, graph: &GraphInner) -> Result<Message, ProtoError> {
        let schema = graph.schema();
        let mut proto = Message::new("Metric");
        let layer_metric = proto.mutable_message(schema, "layer_metric")?;
        layer_metric.set(schema, "layer", graph.layer_name(self.layer)?)?;
        layer_metric.set(schema, "name", self.name(graph)?)?;
        layer_metric.set(schema, "unit", self.unit.as_str())?;
        Ok(proto)
    }
}
