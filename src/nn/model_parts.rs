/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 一次导出所需的全部组成部分（层、权重、目标函数、指标、回调）
 */

use super::callback::Callback;
use super::metric::Metric;
use super::objective::ObjectiveFunction;
use super::{LayerId, WeightsId};

/// 导出的输入
///
/// - `layers`: 遍历的种子层（通常给输入层即可，下游层会沿子边找到）
/// - `weights`: 显式给出的权重；被导出层引用的权重会自动补上
/// - `objective_function`: 缺省时导出一个空的目标函数
#[derive(Debug, Clone, Default)]
pub struct ModelParts {
    pub layers: Vec<LayerId>,
    pub weights: Vec<WeightsId>,
    pub objective_function: Option<ObjectiveFunction>,
    pub metrics: Vec<Metric>,
    pub callbacks: Vec<Callback>,
}

impl ModelParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers<I, L>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LayerId>,
    {
        self.layers.extend(layers.into_iter().map(Into::into));
        self
    }

    pub fn weights(mut self, weights: impl IntoIterator<Item = WeightsId>) -> Self {
        self.weights.extend(weights);
        self
    }

    pub fn objective_function(mut self, objective_function: ObjectiveFunction) -> Self {
        self.objective_function = Some(objective_function);
        self
    }

    pub fn metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics.extend(metrics);
        self
    }

    pub fn callbacks(mut self, callbacks: impl IntoIterator<Item = Callback>) -> Self {
        self.callbacks.extend(callbacks);
        self
    }
}
