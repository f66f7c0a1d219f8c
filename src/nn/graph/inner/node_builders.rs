/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : GraphInner 节点构建方法（new_layer/new_weights/new_initializer/new_callback）
 */

use super::super::types::{LayerNode, WeightsNode};
use super::GraphInner;
use crate::errors::ProtoError;
use crate::nn::callback::Callback;
use crate::nn::layer::LayerArgs;
use crate::nn::node_class::{FieldArgs, NodeFamily, SchemaNode};
use crate::nn::weights::{Initializer, WeightsArgs};
use crate::nn::{LayerId, WeightsId};
use std::rc::Rc;

impl GraphInner {
    /// 用关键字参数实例化某个族的节点（节点类按需生成并缓存）
    pub(in crate::nn) fn instantiate(
        &mut self,
        family: NodeFamily,
        type_name: &str,
        args: &FieldArgs,
    ) -> Result<SchemaNode, ProtoError> {
        let schema = Rc::clone(&self.schema);
        let class = self
            .classes
            .get_or_generate(schema.as_ref(), family, type_name)?;
        class.instantiate(schema.as_ref(), args)
    }

    /// 确定新层的名称，同时返回计数器的新值
    ///
    /// 显式给出的名称原样使用，与已有层重名时报`DuplicateName`；
    /// 未给出时取计数器之后第一个未被占用的 `layer<N>`。
    fn generate_valid_layer_name(&self, name: Option<&str>) -> Result<(String, usize), ProtoError> {
        match name {
            Some(name) => {
                if self.find_layer(name).is_some() {
                    return Err(ProtoError::DuplicateName(name.to_string()));
                }
                Ok((name.to_string(), self.num_layers + 1))
            }
            None => {
                let mut counter = self.num_layers + 1;
                while self.find_layer(&format!("layer{counter}")).is_some() {
                    counter += 1;
                }
                Ok((format!("layer{counter}"), counter))
            }
        }
    }

    /// 创建层
    ///
    /// 所有参数（schema 字段、名称、句柄）先全部校验，校验失败时图保持不变、
    /// 默认层名的计数器也不前进。
    pub fn new_layer(&mut self, type_name: &str, args: LayerArgs) -> Result<LayerId, ProtoError> {
        let kind = self.instantiate(NodeFamily::Layer, type_name, &args.fields)?;
        for &id in args.parents.iter().chain(&args.children).chain(&args.hint_layer) {
            self.get_layer(id)?;
        }
        for &id in &args.weights {
            self.get_weights(id)?;
        }
        let (name, counter) = self.generate_valid_layer_name(args.name.as_deref())?;

        let layer_id = self.layer_id_at(self.layers.len());
        self.layers.push(LayerNode {
            name,
            data_layout: args.data_layout,
            hint_layer: args.hint_layer,
            parents: Vec::new(),
            children: Vec::new(),
            weights: Vec::new(),
            kind,
        });
        self.num_layers = counter;

        for &parent in &args.parents {
            self.add_parent(layer_id, parent)?;
        }
        for &child in &args.children {
            self.add_child(layer_id, child)?;
        }
        for &weights in &args.weights {
            self.add_weights(layer_id, weights)?;
        }
        Ok(layer_id)
    }

    /// 创建权重初始化器（如 `ConstantInitializer`）
    pub fn new_initializer(
        &mut self,
        type_name: &str,
        args: &FieldArgs,
    ) -> Result<Initializer, ProtoError> {
        let node = self.instantiate(NodeFamily::Initializer, type_name, args)?;
        Ok(Initializer(node))
    }

    /// 创建一组权重
    ///
    /// 权重按句柄区分，不要求名称唯一：同名的两组权重在导出时都会出现。
    pub fn new_weights(&mut self, name: &str, args: WeightsArgs) -> Result<WeightsId, ProtoError> {
        let weights_id = self.weights_id_at(self.weights.len());
        self.weights.push(WeightsNode {
            name: name.to_string(),
            initializer: args.initializer,
            optimizer: args.optimizer,
        });
        Ok(weights_id)
    }

    /// 创建回调（如 `CallbackPrint`）
    pub fn new_callback(&mut self, type_name: &str, args: &FieldArgs) -> Result<Callback, ProtoError> {
        let node = self.instantiate(NodeFamily::Callback, type_name, args)?;
        Ok(Callback(node))
    }
}
