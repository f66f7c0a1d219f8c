/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 端到端导出测试：搭建小型网络，写出 prototext 并检查文件内容
 *                 网络结构: Input -> FullyConnected(64) -> Relu -> FullyConnected(10) -> Softmax
 */
use model_proto::errors::ProtoError;
use model_proto::nn::{
    Callback, ExportConfig, FieldArgs, Graph, Layer, LayerArgs, Metric, ModelParts,
    ObjectiveFunction, Optimizer, WeightsArgs,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 返回 (输入层, softmax 层)
fn build_mlp(graph: &Graph) -> Result<(Layer, Layer), ProtoError> {
    let init = graph.initializer("HeNormalInitializer", &FieldArgs::new())?;
    let w1 = graph.weights("fc1_w", WeightsArgs::new().initializer(init))?;

    let data = graph.layer("Input", LayerArgs::new().name("data"))?;
    let fc1 = graph.layer(
        "FullyConnected",
        LayerArgs::new()
            .name("fc1")
            .parent(&data)
            .weights(w1)
            .field("num_neurons", 64),
    )?;
    let relu = graph.layer("Relu", LayerArgs::new().parent(&fc1))?;
    let fc2 = graph.layer(
        "FullyConnected",
        LayerArgs::new().name("fc2").parent(&relu).field("num_neurons", 10),
    )?;
    let prob = graph.layer("Softmax", LayerArgs::new().name("prob").parent(&fc2))?;
    Ok((data, prob))
}

#[test]
fn test_save_mlp() -> Result<(), ProtoError> {
    init_logger();
    let graph = Graph::new();
    let (data, prob) = build_mlp(&graph)?;

    let parts = ModelParts::new()
        .layers([&data])
        .objective_function(ObjectiveFunction::from_terms([&prob]))
        .metrics([Metric::new(&prob).with_unit("%")])
        .callbacks([Callback::new(&graph, "CallbackTimer", &FieldArgs::new())?]);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("mlp.prototext");
    graph.save_model(&path, 64, 10, &parts)?;
    let text = std::fs::read_to_string(&path)?;

    assert!(text.starts_with("model {\n  mini_batch_size: 64\n  block_size: 256\n  num_epochs: 10\n"));
    assert!(text.ends_with("}\n"));
    assert_eq!(text.matches("\n  layer {\n").count(), 5);
    assert_eq!(text.matches("\n  weights {\n").count(), 1);
    // 未命名的 Relu 取得自动生成的名称
    assert!(text.contains("    name: \"layer3\"\n    parents: \"fc1\"\n    children: \"fc2\"\n"));
    assert!(text.contains("    fully_connected {\n      num_neurons: 64\n    }\n"));
    assert!(text.contains("      layer: \"prob\"\n"));
    assert!(text.contains("    timer {\n    }\n"));

    // 层按父层在前的顺序输出
    let position = |name: &str| text.find(&format!("name: \"{name}\"")).unwrap();
    assert!(position("data") < position("fc1"));
    assert!(position("fc1") < position("layer3"));
    assert!(position("fc2") < position("prob"));
    Ok(())
}

#[test]
fn test_save_is_repeatable() -> Result<(), ProtoError> {
    init_logger();
    let graph = Graph::new();
    let (data, _) = build_mlp(&graph)?;
    let parts = ModelParts::new().layers([&data]);

    let dir = tempfile::tempdir()?;
    let first = dir.path().join("a.prototext");
    let second = dir.path().join("b.prototext");
    graph.save_model(&first, 16, 1, &parts)?;
    graph.save_model(&second, 16, 1, &parts)?;
    assert_eq!(std::fs::read(&first)?, std::fs::read(&second)?);
    Ok(())
}

#[test]
fn test_failed_export_leaves_no_file() -> Result<(), ProtoError> {
    init_logger();
    let graph = Graph::new();
    let (data, prob) = build_mlp(&graph)?;
    // prob 多依赖一个种子集之外的输入层
    let other = graph.layer("Input", LayerArgs::new().name("other"))?;
    prob.add_parent(&other)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.prototext");
    let result = graph.save_model(&path, 1, 1, &ModelParts::new().layers([&data]));
    assert!(matches!(result, Err(ProtoError::UnresolvedLayers(ref names)) if names == &["prob"]));
    assert!(!path.exists());

    // 宽松模式下丢弃无法解析的层后照常导出
    let lenient = ExportConfig {
        strict_traversal: false,
        ..ExportConfig::default()
    };
    graph.save_model_with_config(&path, 1, 1, &ModelParts::new().layers([&data]), &lenient)?;
    let text = std::fs::read_to_string(&path)?;
    assert!(!text.contains("name: \"prob\""));
    assert!(text.contains("name: \"fc2\""));
    Ok(())
}

#[test]
fn test_unsupported_optimizer_leaves_no_file() -> Result<(), ProtoError> {
    init_logger();
    let graph = Graph::new();
    let w = graph.weights(
        "fc_w",
        WeightsArgs::new().optimizer(Optimizer::new("Adam", FieldArgs::new())),
    )?;
    let data = graph.layer("Input", LayerArgs::new().name("data"))?;
    graph.layer(
        "FullyConnected",
        LayerArgs::new().name("fc").parent(&data).weights(w).field("num_neurons", 4),
    )?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("adam.prototext");
    let result = graph.save_model(&path, 8, 1, &ModelParts::new().layers([&data]));
    assert!(matches!(result, Err(ProtoError::Unsupported(_))));
    assert!(!path.exists());
    Ok(())
}
