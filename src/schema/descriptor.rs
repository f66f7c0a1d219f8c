/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 消息/字段描述符（Message/Field Descriptor）
 *                 schema 的可序列化表示，由 JSON 加载
 */

use serde::{Deserialize, Serialize};

/// 一个消息类型的描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// 消息类型名（如 "FullyConnected"）
    pub name: String,
    /// 按声明顺序排列的字段
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// 字段描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: Label,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// 字段的重数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Optional,
    Repeated,
}

/// 字段的类型：标量或嵌套消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKind {
    Scalar {
        #[serde(rename = "type")]
        scalar: ScalarType,
    },
    Message {
        message: String,
    },
}

/// 标量类型（proto3 的子集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    Bool,
    String,
}

impl ScalarType {
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::Uint32 | Self::Uint64)
    }

    pub const fn is_floating(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::Uint32 | Self::Uint64)
    }
}

impl FieldDescriptor {
    pub fn scalar(name: &str, scalar: ScalarType) -> Self {
        Self {
            name: name.to_string(),
            label: Label::Optional,
            kind: FieldKind::Scalar { scalar },
        }
    }

    pub fn message(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            label: Label::Optional,
            kind: FieldKind::Message {
                message: message.to_string(),
            },
        }
    }

    /// 改为 repeated 字段
    pub fn repeated(mut self) -> Self {
        self.label = Label::Repeated;
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    /// 嵌套消息的类型名（标量字段返回 None）
    pub fn message_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Message { message } => Some(message),
            FieldKind::Scalar { .. } => None,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match &self.kind {
            FieldKind::Scalar { scalar } => Some(*scalar),
            FieldKind::Message { .. } => None,
        }
    }
}

impl MessageDescriptor {
    pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 字段在声明顺序中的位置
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
