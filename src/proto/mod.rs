/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 文档对象模型：消息、字段取值与文本格式渲染
 */

mod document;
mod message;
pub mod text_format;
mod value;

pub use document::Document;
pub use message::{FieldValue, Message};
pub use value::{FieldArg, Value};

#[cfg(test)]
mod tests;
