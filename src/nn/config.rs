/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 导出配置（ExportConfig）
 */

use crate::errors::ProtoError;
use serde::{Deserialize, Serialize};

/// 导出文档时使用的运行参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 模型的 `block_size`
    pub block_size: i64,
    /// 并行读取数据的进程数（0 表示由引擎决定）
    pub num_parallel_readers: i64,
    /// 每个模型使用的进程数（0 表示由引擎决定）
    pub procs_per_model: i64,
    /// 为 true 时，遍历中无法解析的层（环、种子集之外的依赖）视为错误；
    /// 为 false 时静默丢弃（仅记录 warn 日志）
    pub strict_traversal: bool,
    /// 顶层文档的消息类型
    pub document_type: String,
    /// 顶层文档中存放模型的字段
    pub model_field: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            block_size: 256,
            num_parallel_readers: 0,
            procs_per_model: 0,
            strict_traversal: true,
            document_type: "LbannPB".to_string(),
            model_field: "model".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn to_json(&self) -> Result<String, ProtoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 解析；缺省的字段取默认值
    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        Ok(serde_json::from_str(json)?)
    }
}
