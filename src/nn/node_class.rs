/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 由 schema 生成节点类（Node Class Factory）
 *
 * 三个节点族（层、初始化器、回调）共用同一套生成算法，区别只在于：
 * - 容器消息类型名（Layer / Weights / Callback）
 * - 容器中哪些字段是结构性字段（不作为节点种类）
 *
 * 新增节点种类只需修改 schema，无需手写代码。
 */

use crate::errors::ProtoError;
use crate::proto::{FieldArg, Message};
use crate::schema::{FieldDescriptor, SchemaRegistry};
use std::collections::HashMap;
use std::rc::Rc;

// ==================== 节点族 ====================

/// 节点族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    Layer,
    Initializer,
    Callback,
}

impl NodeFamily {
    /// 该族节点导出时所在的容器消息
    pub const fn container(&self) -> &'static str {
        match self {
            Self::Layer => "Layer",
            Self::Initializer => "Weights",
            Self::Callback => "Callback",
        }
    }

    /// 容器中的结构性字段（不对应任何节点种类）
    ///
    /// 注意：容器消息新增结构性字段时须同步更新此处
    pub const fn structural_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Layer => &[
                "name",
                "parents",
                "children",
                "data_layout",
                "device_allocation",
                "weights",
                "num_neurons_from_data_reader",
                "freeze",
                "hint_layer",
                "weights_data",
                "top",
                "bottom",
                "type",
                "motif_layer",
            ],
            Self::Initializer => &["name", "optimizer"],
            Self::Callback => &[],
        }
    }

    /// 该族在 schema 中的全部节点种类（按容器字段声明顺序）
    pub fn kinds<'s>(&self, schema: &'s dyn SchemaRegistry) -> Result<Vec<&'s str>, ProtoError> {
        schema.nested_kinds(self.container(), self.structural_fields())
    }
}

// ==================== 构造参数 ====================

/// 节点构造时的关键字参数（按给出顺序保存，同名参数以后者为准）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldArgs {
    args: Vec<(String, FieldArg)>,
}

impl FieldArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加一个参数
    pub fn with(mut self, name: &str, value: impl Into<FieldArg>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldArg>) {
        let value = value.into();
        match self.args.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.args.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldArg> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldArg)> {
        self.args.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

// ==================== 节点类 ====================

/// 由 schema 生成的节点类：记录类型名、所在槽位以及全部字段
#[derive(Debug, Clone, PartialEq)]
pub struct NodeClass {
    family: NodeFamily,
    type_name: String,
    /// 容器消息中对应本类型的字段名
    slot: String,
    fields: Vec<FieldDescriptor>,
}

impl NodeClass {
    /// 为`type_name`生成节点类
    ///
    /// `type_name`必须是该族容器中的一个节点种类，否则返回`UnknownType`；
    /// 容器中找不到其槽位时返回`SlotNotFound`。
    pub fn generate(
        schema: &dyn SchemaRegistry,
        family: NodeFamily,
        type_name: &str,
    ) -> Result<Self, ProtoError> {
        let fields = schema.fields_of(type_name)?.to_vec();
        let slot = schema.slot_for(family.container(), type_name)?.to_string();
        if family.structural_fields().contains(&slot.as_str()) {
            return Err(ProtoError::UnknownType(format!(
                "{type_name}是{}的结构性字段类型，不是节点种类",
                family.container()
            )));
        }
        log::debug!(
            "生成节点类{type_name}（{:?}族，槽位{}.{slot}，{}个字段）",
            family,
            family.container(),
            fields.len()
        );
        Ok(Self {
            family,
            type_name: type_name.to_string(),
            slot,
            fields,
        })
    }

    pub const fn family(&self) -> NodeFamily {
        self.family
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    fn field_index(&self, name: &str) -> Result<usize, ProtoError> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| ProtoError::UnknownField {
                type_name: self.type_name.clone(),
                field: name.to_string(),
            })
    }

    /// 用关键字参数实例化节点
    ///
    /// 只接受 schema 中存在的字段名，其余字段保持未设置。
    /// 取值的形态与类型在此处即对照 schema 校验。
    pub fn instantiate(
        self: &Rc<Self>,
        schema: &dyn SchemaRegistry,
        args: &FieldArgs,
    ) -> Result<SchemaNode, ProtoError> {
        let mut values = vec![None; self.fields.len()];
        for (name, value) in args.iter() {
            let index = self.field_index(name)?;
            self.check_value(schema, name, value)?;
            values[index] = Some(value.clone());
        }
        Ok(SchemaNode {
            class: Rc::clone(self),
            values,
        })
    }

    /// 将取值写入一个临时消息，借此复用 Message 的校验
    fn check_value(
        &self,
        schema: &dyn SchemaRegistry,
        name: &str,
        value: &FieldArg,
    ) -> Result<(), ProtoError> {
        Message::new(&self.type_name).assign(schema, name, value)
    }
}

// ==================== 节点实例 ====================

/// 节点类的实例：schema 中每个字段对应一个可选取值（None 表示未设置）
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    class: Rc<NodeClass>,
    values: Vec<Option<FieldArg>>,
}

impl SchemaNode {
    pub fn class(&self) -> &NodeClass {
        &self.class
    }

    pub fn type_name(&self) -> &str {
        self.class.type_name()
    }

    pub fn family(&self) -> NodeFamily {
        self.class.family()
    }

    /// 字段当前取值；字段名不在 schema 中时报错
    pub fn get(&self, field: &str) -> Result<Option<&FieldArg>, ProtoError> {
        let index = self.class.field_index(field)?;
        Ok(self.values[index].as_ref())
    }

    /// 直接给字段赋值
    pub fn set(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        value: impl Into<FieldArg>,
    ) -> Result<(), ProtoError> {
        let index = self.class.field_index(field)?;
        let value = value.into();
        self.class.check_value(schema, field, &value)?;
        self.values[index] = Some(value);
        Ok(())
    }

    /// 将字段恢复为未设置
    pub fn clear(&mut self, field: &str) -> Result<(), ProtoError> {
        let index = self.class.field_index(field)?;
        self.values[index] = None;
        Ok(())
    }

    /// 导出到容器消息中本类型的槽位
    ///
    /// 即使所有字段均未设置，槽位子消息也会被标记为“存在”；
    /// 已设置的字段按 schema 声明顺序写入（单值直接赋值，序列追加到 repeated 字段）。
    pub fn export_into(
        &self,
        schema: &dyn SchemaRegistry,
        container: &mut Message,
    ) -> Result<(), ProtoError> {
        let expected = self.class.family.container();
        if container.type_name() != expected {
            return Err(ProtoError::SlotNotFound {
                container: container.type_name().to_string(),
                type_name: self.type_name().to_string(),
            });
        }
        let message = container.mutable_message(schema, self.class.slot())?;
        for (desc, value) in self.class.fields.iter().zip(&self.values) {
            if let Some(value) = value {
                message.assign(schema, &desc.name, value)?;
            }
        }
        Ok(())
    }

    /// 导出为一条独立的容器消息
    pub fn export_proto(&self, schema: &dyn SchemaRegistry) -> Result<Message, ProtoError> {
        let mut container = Message::new(self.class.family.container());
        self.export_into(schema, &mut container)?;
        Ok(container)
    }
}

// ==================== 节点类缓存 ====================

/// 已生成的节点类（按族和类型名缓存，同一类型只生成一次）
#[derive(Debug, Default)]
pub struct NodeClasses {
    classes: HashMap<(NodeFamily, String), Rc<NodeClass>>,
}

impl NodeClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得（必要时生成）节点类
    pub fn get_or_generate(
        &mut self,
        schema: &dyn SchemaRegistry,
        family: NodeFamily,
        type_name: &str,
    ) -> Result<Rc<NodeClass>, ProtoError> {
        let key = (family, type_name.to_string());
        if let Some(class) = self.classes.get(&key) {
            return Ok(Rc::clone(class));
        }
        let class = Rc::new(NodeClass::generate(schema, family, type_name)?);
        self.classes.insert(key, Rc::clone(&class));
        Ok(class)
    }

    /// 一次性生成某个族的全部节点类（按容器字段声明顺序返回）
    pub fn generate_all(
        &mut self,
        schema: &dyn SchemaRegistry,
        family: NodeFamily,
    ) -> Result<Vec<Rc<NodeClass>>, ProtoError> {
        let kinds: Vec<String> = family
            .kinds(schema)?
            .into_iter()
            .map(str::to_string)
            .collect();
        kinds
            .iter()
            .map(|kind| self.get_or_generate(schema, family, kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
