//! MNIST 分类 MLP 的层图
//!
//! 网络结构: Input -> FullyConnected(128) -> Relu -> FullyConnected(10) -> Softmax
//!          -> CrossEntropy / CategoricalAccuracy

use model_proto::errors::ProtoError;
use model_proto::nn::{FieldArgs, Graph, Layer, LayerArgs, WeightsArgs, WeightsId};

pub struct MnistMlp {
    pub data: Layer,
    pub cross_entropy: Layer,
    pub accuracy: Layer,
    pub weights: Vec<WeightsId>,
}

impl MnistMlp {
    pub fn new(graph: &Graph) -> Result<Self, ProtoError> {
        let data = graph.layer(
            "Input",
            LayerArgs::new()
                .name("data")
                .field("io_buffer", "partitioned")
                .field("target_mode", "classification"),
        )?;

        let fc1_w = graph.weights(
            "fc1_w",
            WeightsArgs::new().initializer(graph.initializer("HeNormalInitializer", &FieldArgs::new())?),
        )?;
        let fc2_w = graph.weights(
            "fc2_w",
            WeightsArgs::new().initializer(graph.initializer("GlorotUniformInitializer", &FieldArgs::new())?),
        )?;

        let fc1 = graph.layer(
            "FullyConnected",
            LayerArgs::new()
                .name("fc1")
                .weights(fc1_w)
                .field("num_neurons", 128)
                .field("has_bias", true),
        )?;
        let relu1 = graph.layer("Relu", LayerArgs::new().name("relu1"))?;
        let fc2 = graph.layer(
            "FullyConnected",
            LayerArgs::new()
                .name("fc2")
                .weights(fc2_w)
                .field("num_neurons", 10)
                .field("has_bias", true),
        )?;
        let prob = graph.layer("Softmax", LayerArgs::new().name("prob"))?;
        prob.call(&fc2.call(&relu1.call(&fc1.call(&data)?)?)?)?;

        // 损失与准确率都以 (预测, 标签) 为父层，标签来自同一个输入层
        let cross_entropy = graph.layer(
            "CrossEntropy",
            LayerArgs::new().name("cross_entropy").parents([&prob, &data]),
        )?;
        let accuracy = graph.layer(
            "CategoricalAccuracy",
            LayerArgs::new().name("accuracy").parents([&prob, &data]),
        )?;

        Ok(Self {
            data,
            cross_entropy,
            accuracy,
            weights: vec![fc1_w, fc2_w],
        })
    }
}
