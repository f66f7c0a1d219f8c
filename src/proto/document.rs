/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 顶层文档（Document）：组装好的消息 + 渲染/落盘
 */

use super::message::Message;
use super::text_format;
use crate::errors::ProtoError;
use crate::schema::SchemaRegistry;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// 训练引擎读取的顶层配置文档
pub struct Document {
    message: Message,
    schema: Rc<dyn SchemaRegistry>,
}

impl Document {
    pub fn new(message: Message, schema: Rc<dyn SchemaRegistry>) -> Self {
        Self { message, schema }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn schema(&self) -> &dyn SchemaRegistry {
        self.schema.as_ref()
    }

    /// 渲染为 protobuf 文本格式
    pub fn render(&self) -> String {
        text_format::render(&self.message, self.schema.as_ref())
    }

    /// 写入文件
    ///
    /// 先在内存中完整渲染，再写到目标目录下的临时文件，最后原子地重命名为目标路径；
    /// 任何一步失败都不会在目标路径留下半成品。
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ProtoError> {
        let path = path.as_ref();
        let text = self.render();

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;

        log::debug!("已写入文档{}（{}字节）", path.display(), text.len());
        Ok(())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
