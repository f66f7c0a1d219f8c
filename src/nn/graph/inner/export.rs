/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 导出：各节点 -> 消息，组装顶层文档，save_model
 *
 * 组装顺序：
 * 1. 模型的固定标量参数（mini_batch_size、num_epochs 及 ExportConfig 中的运行参数）
 * 2. 从种子层遍历，按遍历顺序导出层
 * 3. 权重：先显式给出的，再按遍历顺序补上被层引用的；按句柄去重
 * 4. 目标函数（缺省为空）
 * 5. 指标与回调（按给出顺序）
 */

use super::GraphInner;
use crate::errors::ProtoError;
use crate::nn::config::ExportConfig;
use crate::nn::model_parts::ModelParts;
use crate::nn::objective::ObjectiveFunction;
use crate::nn::{LayerId, WeightsId};
use crate::proto::{Document, Message};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::Path;

impl GraphInner {
    // ========== 单个节点 ==========

    /// 导出一个层：结构性字段 + 该层种类的槽位子消息
    pub fn export_layer(&self, id: LayerId) -> Result<Message, ProtoError> {
        let schema = self.schema();
        let layer = self.get_layer(id)?;
        let join_layers = |ids: &[LayerId]| -> Result<String, ProtoError> {
            let names = ids
                .iter()
                .map(|&l| self.layer_name(l))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names.join(" "))
        };
        let weights = layer
            .weights
            .iter()
            .map(|&w| self.weights_name(w))
            .collect::<Result<Vec<_>, _>>()?;
        let hint_layer = match layer.hint_layer {
            Some(hint) => self.layer_name(hint)?,
            None => "",
        };

        let mut proto = Message::new("Layer");
        proto.set(schema, "name", layer.name.as_str())?;
        proto.set(schema, "parents", join_layers(&layer.parents)?)?;
        proto.set(schema, "children", join_layers(&layer.children)?)?;
        proto.set(schema, "data_layout", layer.data_layout.as_str())?;
        proto.set(schema, "weights", weights.join(" "))?;
        proto.set(schema, "hint_layer", hint_layer)?;
        layer.kind.export_into(schema, &mut proto)?;
        Ok(proto)
    }

    /// 导出一组权重：名称 + 初始化器槽位
    ///
    /// 指定了优化器的权重暂不支持，直接报错。
    pub fn export_weights(&self, id: WeightsId) -> Result<Message, ProtoError> {
        let schema = self.schema();
        let weights = self.get_weights(id)?;
        // TODO: 引擎侧支持自定义优化器后，按 Optimizer 的 schema 导出
        if let Some(optimizer) = &weights.optimizer {
            return Err(ProtoError::Unsupported(format!(
                "权重{}不能使用非默认优化器（{}）",
                weights.name, optimizer.type_name
            )));
        }

        let mut proto = Message::new("Weights");
        proto.set(schema, "name", weights.name.as_str())?;
        if let Some(initializer) = &weights.initializer {
            initializer.export_into(schema, &mut proto)?;
        }
        Ok(proto)
    }

    /// 需要导出的权重：显式给出的在前，其后按层的顺序补上被引用的；按句柄去重
    pub(in crate::nn::graph) fn collect_weights(
        &self,
        explicit: &[WeightsId],
        layers: &[LayerId],
    ) -> Result<Vec<WeightsId>, ProtoError> {
        let mut collected: IndexSet<WeightsId> = explicit.iter().copied().collect();
        for &layer in layers {
            collected.extend(self.layer_weights(layer)?.iter().copied());
        }

        let mut by_name: HashMap<&str, WeightsId> = HashMap::new();
        for &id in &collected {
            let name = self.weights_name(id)?;
            if let Some(&first) = by_name.get(name) {
                log::warn!("权重名{name}对应多组不同的权重（{first}、{id}），导出后会重名");
            } else {
                by_name.insert(name, id);
            }
        }
        Ok(collected.into_iter().collect())
    }

    // ========== 组装 ==========

    /// 组装模型消息（不含外层文档）
    pub fn build_model(
        &self,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
        config: &ExportConfig,
    ) -> Result<Message, ProtoError> {
        let schema = self.schema();
        let mut model = Message::new("Model");
        model.set(schema, "mini_batch_size", mini_batch_size)?;
        model.set(schema, "block_size", config.block_size)?;
        model.set(schema, "num_epochs", epochs)?;
        model.set(schema, "num_parallel_readers", config.num_parallel_readers)?;
        model.set(schema, "procs_per_model", config.procs_per_model)?;

        let layers = if config.strict_traversal {
            self.traverse_layer_graph_strict(&parts.layers)?
        } else {
            self.traverse_layer_graph(&parts.layers)?
        };
        for &layer in &layers {
            log::trace!("导出层{}", self.layer_name(layer)?);
            model.push_message(schema, "layer", self.export_layer(layer)?)?;
        }

        let weights = self.collect_weights(&parts.weights, &layers)?;
        for &w in &weights {
            log::trace!("导出权重{}", self.weights_name(w)?);
            model.push_message(schema, "weights", self.export_weights(w)?)?;
        }

        let objective = match &parts.objective_function {
            Some(objective) => objective.export_proto(self)?,
            None => ObjectiveFunction::new().export_proto(self)?,
        };
        model.set_message(schema, "objective_function", objective)?;

        for metric in &parts.metrics {
            model.push_message(schema, "metric", metric.export_proto(self)?)?;
        }
        for callback in &parts.callbacks {
            model.push_message(schema, "callback", callback.export_proto(self)?)?;
        }

        log::debug!(
            "模型组装完成：{}个层，{}组权重，{}个指标，{}个回调",
            layers.len(),
            weights.len(),
            parts.metrics.len(),
            parts.callbacks.len()
        );
        Ok(model)
    }

    /// 组装顶层文档
    pub fn build_document(
        &self,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
        config: &ExportConfig,
    ) -> Result<Document, ProtoError> {
        let model = self.build_model(mini_batch_size, epochs, parts, config)?;
        let mut document = Message::new(&config.document_type);
        document.set_message(self.schema(), &config.model_field, model)?;
        Ok(Document::new(document, self.schema_rc()))
    }

    // ========== 落盘 ==========

    /// 用默认配置导出并写入文件
    pub fn save_model<P: AsRef<Path>>(
        &self,
        path: P,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
    ) -> Result<(), ProtoError> {
        self.save_model_with_config(path, mini_batch_size, epochs, parts, &ExportConfig::default())
    }

    /// 导出并写入文件
    ///
    /// 文档在内存中完整组装、渲染后才写盘；任何一步失败都不会留下目标文件。
    pub fn save_model_with_config<P: AsRef<Path>>(
        &self,
        path: P,
        mini_batch_size: i64,
        epochs: i64,
        parts: &ModelParts,
        config: &ExportConfig,
    ) -> Result<(), ProtoError> {
        let document = self.build_document(mini_batch_size, epochs, parts, config)?;
        document.write_to(path)
    }
}
