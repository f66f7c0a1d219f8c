/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 目标函数（ObjectiveFunction）及其各项
 *
 * 目前引擎只支持两种项：层输出项（LayerTerm）与权重 L2 正则项（L2WeightRegularization）。
 * 每种项自己声明它在 ObjectiveFunction 消息中的槽位，导出时无需判断具体类型。
 */

use super::{GraphInner, Layer, LayerId, WeightsId};
use crate::errors::ProtoError;
use crate::proto::Message;
use enum_dispatch::enum_dispatch;

/// 目标函数中的一项
#[enum_dispatch]
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveFunctionTerm {
    LayerTerm,
    L2WeightRegularization,
}

#[enum_dispatch(ObjectiveFunctionTerm)]
pub trait TraitForTerm {
    /// 该项在 ObjectiveFunction 消息中所在的 repeated 字段
    fn slot(&self) -> &'static str;

    /// 导出为对应的子消息（每种项都须自行实现）
    fn export_proto(&self, _graph: &GraphInner) -> Result<Message, ProtoError> {
        Err(ProtoError::Unimplemented(format!(
            "{}未实现export_proto",
            std::any::type_name::<Self>()
        )))
    }
}

// ==================== 层输出项 ====================

/// 取某个层的输出值作为目标函数的一项
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTerm {
    pub layer: LayerId,
    pub scale: f64,
}

impl LayerTerm {
    pub const fn new(layer: LayerId) -> Self {
        Self { layer, scale: 1.0 }
    }

    pub const fn with_scale(layer: LayerId, scale: f64) -> Self {
        Self { layer, scale }
    }
}

impl TraitForTerm for LayerTerm {
    fn slot(&self) -> &'static str {
        "layer_term"
    }

    fn export_proto(&self, graph: &GraphInner) -> Result<Message, ProtoError> {
        let schema = graph.schema();
        let mut proto = Message::new("LayerTerm");
        proto.set(schema, "layer", graph.layer_name(self.layer)?)?;
        proto.set(schema, "scale_factor", self.scale)?;
        Ok(proto)
    }
}

// ==================== L2 正则项 ====================

/// 对若干组权重施加的 L2 正则
#[derive(Debug, Clone, PartialEq)]
pub struct L2WeightRegularization {
    pub weights: Vec<WeightsId>,
    pub scale: f64,
}

impl L2WeightRegularization {
    pub fn new(weights: impl IntoIterator<Item = WeightsId>, scale: f64) -> Self {
        Self {
            weights: weights.into_iter().collect(),
            scale,
        }
    }
}

impl TraitForTerm for L2WeightRegularization {
    fn slot(&self) -> &'static str {
        "l2_weight_regularization"
    }

    fn export_proto(&self, graph: &GraphInner) -> Result<Message, ProtoError> {
        let schema = graph.schema();
        let names = self
            .weights
            .iter()
            .map(|&w| graph.weights_name(w))
            .collect::<Result<Vec<_>, _>>()?;
        let mut proto = Message::new("L2WeightRegularization");
        proto.set(schema, "scale_factor", self.scale)?;
        proto.set(schema, "weights", names.join(" "))?;
        Ok(proto)
    }
}

// ==================== 目标函数 ====================

impl From<LayerId> for ObjectiveFunctionTerm {
    fn from(layer: LayerId) -> Self {
        LayerTerm::new(layer).into()
    }
}

impl From<&Layer> for ObjectiveFunctionTerm {
    fn from(layer: &Layer) -> Self {
        LayerTerm::new(layer.id()).into()
    }
}

/// 训练时优化的目标函数：各项之和
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveFunction {
    terms: Vec<ObjectiveFunctionTerm>,
}

impl ObjectiveFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由若干项构造；直接给出的层会被包装成 `LayerTerm`
    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectiveFunctionTerm>,
    {
        let mut objective = Self::new();
        for term in terms {
            objective.add_term(term);
        }
        objective
    }

    /// 添加一项；直接给出的层会被包装成 `LayerTerm`
    pub fn add_term(&mut self, term: impl Into<ObjectiveFunctionTerm>) {
        self.terms.push(term.into());
    }

    pub fn terms(&self) -> &[ObjectiveFunctionTerm] {
        &self.terms
    }

    pub fn export_proto(&self, graph: &GraphInner) -> Result<Message, ProtoError> {
        let schema = graph.schema();
        let mut proto = Message::new("ObjectiveFunction");
        for term in &self.terms {
            proto.push_message(schema, term.slot(), term.export_proto(graph)?)?;
        }
        Ok(proto)
    }
}
