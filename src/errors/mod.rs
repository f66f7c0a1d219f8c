/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 模型描述构建器的统一错误类型
 */

use crate::nn::{LayerId, WeightsId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    // 节点构造期
    #[error("未知参数`{field}`：类型{type_name}的schema中没有该字段")]
    UnknownField { type_name: String, field: String },
    #[error("未知类型：{0}")]
    UnknownType(String),
    #[error("节点名称`{0}`在图中重复")]
    DuplicateName(String),
    #[error("字段{type_name}.{field}与所给的值不匹配：{message}")]
    FieldMismatch {
        type_name: String,
        field: String,
        message: String,
    },

    // 导出期
    #[error("容器{container}中找不到类型为{type_name}的槽位")]
    SlotNotFound { container: String, type_name: String },
    #[error("暂不支持：{0}")]
    Unsupported(String),
    #[error("未实现：{0}")]
    Unimplemented(String),
    #[error("以下层的父层始终未被全部访问（存在环或依赖了种子集之外的层）：{0:?}")]
    UnresolvedLayers(Vec<String>),

    // 句柄
    #[error("图中不存在层{0}")]
    LayerNotFound(LayerId),
    #[error("图中不存在权重{0}")]
    WeightsNotFound(WeightsId),

    // 外部
    #[error("解析JSON失败：{0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("IO 错误：{0}")]
    Io(#[from] std::io::Error),
}
