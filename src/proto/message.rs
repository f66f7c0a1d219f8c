/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 内存中的消息对象（Message）
 *
 * 只保存“已设置”的字段；所有写入都对照 schema 校验：
 * - 单值标量字段用 `set`
 * - repeated 标量字段用 `extend`
 * - 单值子消息用 `mutable_message`（取或建，并标记为存在）/`set_message`
 * - repeated 子消息用 `push_message`
 * 输出时的字段顺序由 schema 的声明顺序决定，与写入顺序无关。
 */

use super::value::{FieldArg, Value};
use crate::errors::ProtoError;
use crate::schema::{FieldDescriptor, ScalarType, SchemaRegistry};
use indexmap::IndexMap;

/// 已设置字段的取值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Repeated(Vec<Value>),
    Message(Message),
    Messages(Vec<Message>),
}

impl FieldValue {
    const fn shape_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "单值标量",
            Self::Repeated(_) => "repeated标量",
            Self::Message(_) => "单值子消息",
            Self::Messages(_) => "repeated子消息",
        }
    }
}

/// 一个消息实例
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    type_name: String,
    fields: IndexMap<String, FieldValue>,
}

impl Message {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    // ========== 读取 ==========

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// 已设置字段的名称（写入顺序）
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// 已设置字段的数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn scalar(&self, field: &str) -> Option<&Value> {
        match self.fields.get(field) {
            Some(FieldValue::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    /// repeated 标量字段的内容（未设置时为空）
    pub fn repeated(&self, field: &str) -> &[Value] {
        match self.fields.get(field) {
            Some(FieldValue::Repeated(vs)) => vs,
            _ => &[],
        }
    }

    pub fn message(&self, field: &str) -> Option<&Message> {
        match self.fields.get(field) {
            Some(FieldValue::Message(m)) => Some(m),
            _ => None,
        }
    }

    /// repeated 子消息字段的内容（未设置时为空）
    pub fn messages(&self, field: &str) -> &[Message] {
        match self.fields.get(field) {
            Some(FieldValue::Messages(ms)) => ms,
            _ => &[],
        }
    }

    // ========== 写入 ==========

    /// 设置单值标量字段
    pub fn set(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), ProtoError> {
        let desc = schema.field(&self.type_name, field)?;
        let scalar = self.expect_scalar(desc, false)?;
        let value = self.coerce(desc, scalar, value.into())?;
        self.fields
            .insert(field.to_string(), FieldValue::Scalar(value));
        Ok(())
    }

    /// 向 repeated 标量字段追加元素
    ///
    /// 即使`values`为空，字段也会被记为已设置（内容为空序列）。
    pub fn extend<I>(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        values: I,
    ) -> Result<(), ProtoError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let desc = schema.field(&self.type_name, field)?;
        let scalar = self.expect_scalar(desc, true)?;
        let values = values
            .into_iter()
            .map(|v| self.coerce(desc, scalar, v.into()))
            .collect::<Result<Vec<_>, _>>()?;
        match self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Repeated(Vec::new()))
        {
            FieldValue::Repeated(existing) => {
                existing.extend(values);
                Ok(())
            }
            stored => Err(Self::stored_mismatch(&self.type_name, desc, stored)),
        }
    }

    /// 按参数形态写入：单值走`set`，序列走`extend`
    pub fn assign(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        arg: &FieldArg,
    ) -> Result<(), ProtoError> {
        match arg {
            FieldArg::Single(v) => self.set(schema, field, v.clone()),
            FieldArg::Seq(vs) => self.extend(schema, field, vs.iter().cloned()),
        }
    }

    /// 取得单值子消息（不存在则创建空消息），调用后该字段即为“存在”
    pub fn mutable_message(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
    ) -> Result<&mut Message, ProtoError> {
        let desc = schema.field(&self.type_name, field)?;
        let nested = self.expect_message(desc, false)?.to_string();
        match self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Message(Message::new(&nested)))
        {
            FieldValue::Message(m) => Ok(m),
            stored => Err(Self::stored_mismatch(&self.type_name, desc, stored)),
        }
    }

    /// 用给定消息整体替换单值子消息
    pub fn set_message(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        message: Message,
    ) -> Result<(), ProtoError> {
        let desc = schema.field(&self.type_name, field)?;
        let nested = self.expect_message(desc, false)?;
        self.check_message_type(desc, nested, &message)?;
        self.fields
            .insert(field.to_string(), FieldValue::Message(message));
        Ok(())
    }

    /// 向 repeated 子消息字段追加一条消息
    pub fn push_message(
        &mut self,
        schema: &dyn SchemaRegistry,
        field: &str,
        message: Message,
    ) -> Result<(), ProtoError> {
        let desc = schema.field(&self.type_name, field)?;
        let nested = self.expect_message(desc, true)?;
        self.check_message_type(desc, nested, &message)?;
        match self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| FieldValue::Messages(Vec::new()))
        {
            FieldValue::Messages(ms) => {
                ms.push(message);
                Ok(())
            }
            stored => Err(Self::stored_mismatch(&self.type_name, desc, stored)),
        }
    }

    /// 清除字段（恢复为未设置）
    pub fn clear_field(&mut self, field: &str) {
        self.fields.shift_remove(field);
    }

    // ========== 校验 ==========

    fn mismatch(&self, desc: &FieldDescriptor, message: String) -> ProtoError {
        ProtoError::FieldMismatch {
            type_name: self.type_name.clone(),
            field: desc.name.clone(),
            message,
        }
    }

    /// 已保存的取值与当前 schema 的字段形态不符（消息曾在另一份 schema 下写入）
    fn stored_mismatch(type_name: &str, desc: &FieldDescriptor, stored: &FieldValue) -> ProtoError {
        ProtoError::FieldMismatch {
            type_name: type_name.to_string(),
            field: desc.name.clone(),
            message: format!("该字段已按{}保存，与当前 schema 的定义不符", stored.shape_name()),
        }
    }

    fn expect_scalar(&self, desc: &FieldDescriptor, repeated: bool) -> Result<ScalarType, ProtoError> {
        let scalar = desc
            .scalar_type()
            .ok_or_else(|| self.mismatch(desc, "该字段是子消息，不能写入标量".to_string()))?;
        if desc.is_repeated() != repeated {
            return Err(self.mismatch(desc, Self::label_hint(desc)));
        }
        Ok(scalar)
    }

    fn expect_message<'d>(
        &self,
        desc: &'d FieldDescriptor,
        repeated: bool,
    ) -> Result<&'d str, ProtoError> {
        let nested = desc
            .message_type()
            .ok_or_else(|| self.mismatch(desc, "该字段是标量，不能写入子消息".to_string()))?;
        if desc.is_repeated() != repeated {
            return Err(self.mismatch(desc, Self::label_hint(desc)));
        }
        Ok(nested)
    }

    fn label_hint(desc: &FieldDescriptor) -> String {
        if desc.is_repeated() {
            "该字段是repeated字段，须提供序列".to_string()
        } else {
            "该字段是单值字段，不能提供序列".to_string()
        }
    }

    fn check_message_type(
        &self,
        desc: &FieldDescriptor,
        expected: &str,
        message: &Message,
    ) -> Result<(), ProtoError> {
        if message.type_name != expected {
            return Err(self.mismatch(
                desc,
                format!("期望{}消息，实际为{}", expected, message.type_name),
            ));
        }
        Ok(())
    }

    /// 按标量类型校验并转换取值（整数可放宽为浮点）
    fn coerce(
        &self,
        desc: &FieldDescriptor,
        scalar: ScalarType,
        value: Value,
    ) -> Result<Value, ProtoError> {
        match (scalar, value) {
            (ScalarType::String, v @ Value::Str(_)) | (ScalarType::Bool, v @ Value::Bool(_)) => Ok(v),
            (s, Value::Int(i)) if s.is_integer() => {
                if s.is_unsigned() && i < 0 {
                    return Err(self.mismatch(desc, format!("无符号字段不能为负数：{i}")));
                }
                Ok(Value::Int(i))
            }
            (s, Value::Int(i)) if s.is_floating() => Ok(Value::Float(i as f64)),
            (s, v @ Value::Float(_)) if s.is_floating() => Ok(v),
            (s, v) => Err(self.mismatch(
                desc,
                format!("期望{:?}类型，实际为{}", s, v.kind_name()),
            )),
        }
    }
}
