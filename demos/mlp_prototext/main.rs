//! # MNIST MLP 导出示例
//!
//! 搭建一个两层全连接分类网络，连同目标函数、指标和回调一起导出为 prototext：
//! - 目标函数：交叉熵 + 权重 L2 正则
//! - 指标：分类准确率（%）
//! - 回调：打印、计时
//!
//! ## 运行
//! ```bash
//! cargo run --example mlp_prototext
//! ```

mod model;

use model::MnistMlp;
use model_proto::errors::ProtoError;
use model_proto::nn::{
    Callback, FieldArgs, Graph, L2WeightRegularization, LayerTerm, Metric, ModelParts,
    ObjectiveFunction,
};

fn main() -> Result<(), ProtoError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== MNIST MLP 模型描述导出 ===\n");

    // 1. 层图
    let graph = Graph::with_name("mnist_mlp");
    let model = MnistMlp::new(&graph)?;

    // 2. 目标函数
    let mut objective = ObjectiveFunction::new();
    objective.add_term(LayerTerm::new(model.cross_entropy.id()));
    objective.add_term(L2WeightRegularization::new(model.weights.iter().copied(), 1e-4));

    // 3. 指标与回调
    let accuracy = Metric::new(&model.accuracy)
        .with_name("categorical accuracy")
        .with_unit("%");
    let callbacks = [
        Callback::new(&graph, "CallbackPrint", &FieldArgs::new().with("interval", 1))?,
        Callback::new(&graph, "CallbackTimer", &FieldArgs::new())?,
    ];

    // 4. 导出（只给输入层，其余层沿子边找到）
    let parts = ModelParts::new()
        .layers([&model.data])
        .objective_function(objective)
        .metrics([accuracy])
        .callbacks(callbacks);

    println!("{}", graph.summary_string());

    let path = std::env::temp_dir().join("mnist_mlp.prototext");
    graph.save_model(&path, 64, 20, &parts)?;
    println!("已写入: {}\n", path.display());
    println!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
