//! # Model Proto
//!
//! `model_proto`用于在内存中搭建神经网络的模型描述（层图、权重、目标函数、指标、回调），
//! 再按 schema 导出为训练引擎读取的 protobuf 文本格式（prototext）配置文档。
//!
//! 层、初始化器、回调的种类完全由 schema 决定：新增种类只需修改 schema，无需手写代码。
//!
//! ```ignore
//! use model_proto::nn::{Graph, LayerArgs, ModelParts};
//!
//! let graph = Graph::new();
//! let data = graph.layer("Input", LayerArgs::new().name("data"))?;
//! let fc = graph.layer("FullyConnected", LayerArgs::new().field("num_neurons", 10))?;
//! fc.call(&data)?;
//! graph.save_model("model.prototext", 64, 10, &ModelParts::new().layers([&data]))?;
//! ```

pub mod errors;
pub mod nn;
pub mod proto;
pub mod schema;
pub mod utils;
