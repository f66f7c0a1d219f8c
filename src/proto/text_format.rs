/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : protobuf 文本格式（prototext）渲染
 *
 * 规则：
 * - 字段按 schema 声明顺序输出（而非写入顺序）
 * - 标量：`name: value`；repeated 标量每个元素一行
 * - 子消息：`name {` ... `}`，每层缩进两个空格；已存在的空子消息同样输出
 * - 值等于 proto3 默认值的标量、空的 repeated 字段不输出
 */

use super::message::{FieldValue, Message};
use super::value::Value;
use crate::schema::SchemaRegistry;
use std::fmt::Write;

const INDENT: &str = "  ";

/// 将消息渲染为文本格式
pub fn render(message: &Message, schema: &dyn SchemaRegistry) -> String {
    let mut out = String::new();
    write_message(&mut out, message, schema, 0);
    out
}

fn write_message(out: &mut String, message: &Message, schema: &dyn SchemaRegistry, depth: usize) {
    for name in field_order(message, schema) {
        let Some(value) = message.get(&name) else {
            continue;
        };
        match value {
            FieldValue::Scalar(v) => {
                if !v.is_default() {
                    write_scalar(out, &name, v, depth);
                }
            }
            FieldValue::Repeated(vs) => {
                for v in vs {
                    write_scalar(out, &name, v, depth);
                }
            }
            FieldValue::Message(m) => write_nested(out, &name, m, schema, depth),
            FieldValue::Messages(ms) => {
                for m in ms {
                    write_nested(out, &name, m, schema, depth);
                }
            }
        }
    }
}

/// 输出顺序：schema 声明顺序；类型不在 schema 中时退回写入顺序
fn field_order(message: &Message, schema: &dyn SchemaRegistry) -> Vec<String> {
    match schema.fields_of(message.type_name()) {
        Ok(fields) => fields.iter().map(|f| f.name.clone()).collect(),
        Err(_) => {
            log::warn!("schema 中没有类型{}，按写入顺序输出字段", message.type_name());
            message.field_names().map(str::to_string).collect()
        }
    }
}

fn write_nested(
    out: &mut String,
    name: &str,
    message: &Message,
    schema: &dyn SchemaRegistry,
    depth: usize,
) {
    let indent = INDENT.repeat(depth);
    let _ = writeln!(out, "{indent}{name} {{");
    write_message(out, message, schema, depth + 1);
    let _ = writeln!(out, "{indent}}}");
}

fn write_scalar(out: &mut String, name: &str, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);
    let _ = writeln!(out, "{indent}{name}: {}", format_value(value));
}

/// 单个标量的文本表示
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => format_float(*v),
        Value::Bool(v) => v.to_string(),
        Value::Str(v) => format!("\"{}\"", escape_bytes(v.as_bytes())),
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        // `{:?}`保证最短的可往返表示，且整数值带小数点（1.0）
        format!("{v:?}")
    }
}

/// C 风格转义；非 ASCII 字节以八进制输出
fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'"' => out.push_str("\\\""),
            b'\'' => out.push_str("\\'"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out
}
