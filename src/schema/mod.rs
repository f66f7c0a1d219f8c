/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Schema 注册表：按类型名查询消息的字段表
 *
 * 注册表是只读、封闭的：节点类工厂只能使用注册表中存在的字段。
 * - `SchemaRegistry`: 注册表能力（trait），导出器只依赖它
 * - `Schema`: 由 JSON 加载的具体注册表（内置一份 lbann 风格的 schema）
 */

mod descriptor;

pub use descriptor::{FieldDescriptor, FieldKind, Label, MessageDescriptor, ScalarType};

use crate::errors::ProtoError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema 注册表能力
///
/// 只有 `message()` 需要实现，其余查询都建立在它之上。
pub trait SchemaRegistry {
    /// 按类型名查找消息描述
    fn message(&self, type_name: &str) -> Option<&MessageDescriptor>;

    /// 类型的字段表（声明顺序）
    fn fields_of(&self, type_name: &str) -> Result<&[FieldDescriptor], ProtoError> {
        self.message(type_name)
            .map(|m| m.fields.as_slice())
            .ok_or_else(|| ProtoError::UnknownType(type_name.to_string()))
    }

    /// 查找单个字段
    fn field(&self, type_name: &str, field_name: &str) -> Result<&FieldDescriptor, ProtoError> {
        let message = self
            .message(type_name)
            .ok_or_else(|| ProtoError::UnknownType(type_name.to_string()))?;
        message
            .field(field_name)
            .ok_or_else(|| ProtoError::UnknownField {
                type_name: type_name.to_string(),
                field: field_name.to_string(),
            })
    }

    /// 容器消息中、声明类型为`nested`的字段名（即“槽位”）
    fn slot_for(&self, container: &str, nested: &str) -> Result<&str, ProtoError> {
        self.fields_of(container)?
            .iter()
            .find(|f| f.message_type() == Some(nested))
            .map(|f| f.name.as_str())
            .ok_or_else(|| ProtoError::SlotNotFound {
                container: container.to_string(),
                type_name: nested.to_string(),
            })
    }

    /// 容器中除结构性字段外的所有嵌套消息类型（即该族的全部节点种类）
    fn nested_kinds(&self, container: &str, skip: &[&str]) -> Result<Vec<&str>, ProtoError> {
        Ok(self
            .fields_of(container)?
            .iter()
            .filter(|f| !skip.contains(&f.name.as_str()))
            .filter_map(FieldDescriptor::message_type)
            .collect())
    }
}

/// 由 JSON 描述的具体 schema
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// 类型名 -> 消息描述（保持文件中的声明顺序）
    messages: IndexMap<String, MessageDescriptor>,
}

/// 内置 schema 文本
const BUILTIN_SCHEMA: &str = include_str!("builtin.json");

#[derive(Serialize, Deserialize)]
struct SchemaFile {
    messages: Vec<MessageDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置的 lbann 风格 schema
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SCHEMA).expect("内置schema应当是合法的JSON")
    }

    /// 从 JSON 字符串解析
    ///
    /// 格式：`{"messages": [{"name": "...", "fields": [...]}, ...]}`
    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        let file: SchemaFile = serde_json::from_str(json)?;
        let mut schema = Self::new();
        for message in file.messages {
            schema.add_message(message);
        }
        Ok(schema)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ProtoError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// 转换为与`from_json`相同格式的 JSON 字符串
    pub fn to_json(&self) -> Result<String, ProtoError> {
        let file = SchemaFile {
            messages: self.messages.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// 添加（或替换）一个消息类型
    pub fn add_message(&mut self, message: MessageDescriptor) {
        self.messages.insert(message.name.clone(), message);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.messages.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}

impl SchemaRegistry for Schema {
    fn message(&self, type_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(type_name)
    }
}
