/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 模块的类型定义：层/权重句柄与图内节点
 */

use crate::nn::node_class::SchemaNode;
use crate::nn::weights::{Initializer, Optimizer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 图实例的标识（进程内唯一）
///
/// 句柄中记录签发它的图，其他图收到该句柄时一律视为不存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct GraphId(u64);

impl GraphId {
    pub(crate) fn next() -> Self {
        static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// 层句柄（所属图 + 图内层表的下标），不持有层本身
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId {
    pub(crate) graph: GraphId,
    pub(crate) index: usize,
}

/// 权重句柄（所属图 + 图内权重表的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeightsId {
    pub(crate) graph: GraphId,
    pub(crate) index: usize,
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer#{}", self.index)
    }
}

impl fmt::Display for WeightsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weights#{}", self.index)
    }
}

/// 数据布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLayout {
    /// 数据并行（默认）
    #[default]
    DataParallel,
    /// 模型并行
    ModelParallel,
}

impl DataLayout {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DataParallel => "data_parallel",
            Self::ModelParallel => "model_parallel",
        }
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 图中的一个层
///
/// 父/子/权重/提示层都只以句柄引用，层之间不存在所有权关系。
#[derive(Debug, Clone)]
pub(crate) struct LayerNode {
    pub name: String,
    pub data_layout: DataLayout,
    /// 仅用于导出名称（供引擎做形状推断），不参与遍历
    pub hint_layer: Option<LayerId>,
    pub parents: Vec<LayerId>,
    pub children: Vec<LayerId>,
    pub weights: Vec<WeightsId>,
    /// schema 定义的种类字段
    pub kind: SchemaNode,
}

/// 图中的一组可训练参数
#[derive(Debug, Clone)]
pub(crate) struct WeightsNode {
    pub name: String,
    pub initializer: Option<Initializer>,
    pub optimizer: Option<Optimizer>,
}
