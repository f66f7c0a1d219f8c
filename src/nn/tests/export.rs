use super::identity;
use crate::assert_err;
use crate::errors::ProtoError;
use crate::nn::{
    ExportConfig, FieldArgs, GraphInner, LayerArgs, LayerId, Metric, ModelParts,
    ObjectiveFunction, Optimizer, WeightsArgs,
};
use crate::proto::Value;

/// data(Input) -> fc(FullyConnected, 权重 fc_w)
fn input_and_fc(graph: &mut GraphInner) -> (LayerId, LayerId) {
    let init = graph
        .new_initializer("HeNormalInitializer", &FieldArgs::new())
        .unwrap();
    let w = graph
        .new_weights("fc_w", WeightsArgs::new().initializer(init))
        .unwrap();
    let data = graph.new_layer("Input", LayerArgs::new().name("data")).unwrap();
    let fc = graph
        .new_layer(
            "FullyConnected",
            LayerArgs::new()
                .name("fc")
                .parent(data)
                .weights(w)
                .field("num_neurons", 10),
        )
        .unwrap();
    (data, fc)
}

#[test]
fn test_export_layer_structure() {
    let mut graph = GraphInner::new();
    let (data, fc) = input_and_fc(&mut graph);
    graph.set_hint_layer(fc, Some(data)).unwrap();

    let proto = graph.export_layer(fc).unwrap();
    assert_eq!(proto.type_name(), "Layer");
    assert_eq!(proto.scalar("name"), Some(&Value::from("fc")));
    assert_eq!(proto.scalar("parents"), Some(&Value::from("data")));
    assert_eq!(proto.scalar("children"), Some(&Value::from("")));
    assert_eq!(proto.scalar("weights"), Some(&Value::from("fc_w")));
    assert_eq!(proto.scalar("hint_layer"), Some(&Value::from("data")));
    assert_eq!(proto.scalar("data_layout"), Some(&Value::from("data_parallel")));

    let slot = proto.message("fully_connected").unwrap();
    assert_eq!(slot.scalar("num_neurons"), Some(&Value::Int(10)));
    assert!(!slot.has_field("has_bias"));
}

#[test]
fn test_export_layer_without_fields_marks_slot_present() {
    let mut graph = GraphInner::new();
    let relu = graph.new_layer("Relu", LayerArgs::new()).unwrap();
    let proto = graph.export_layer(relu).unwrap();
    assert!(proto.message("relu").unwrap().is_empty());
    assert!(proto.message("input").is_none());
}

#[test]
fn test_export_weights() {
    let mut graph = GraphInner::new();
    let init = graph
        .new_initializer("ConstantInitializer", &FieldArgs::new().with("value", 0.5))
        .unwrap();
    let w = graph
        .new_weights("bias", WeightsArgs::new().initializer(init))
        .unwrap();
    let bare = graph.new_weights("bare", WeightsArgs::new()).unwrap();

    let proto = graph.export_weights(w).unwrap();
    assert_eq!(proto.scalar("name"), Some(&Value::from("bias")));
    let slot = proto.message("constant_initializer").unwrap();
    assert_eq!(slot.scalar("value"), Some(&Value::Float(0.5)));

    let proto = graph.export_weights(bare).unwrap();
    assert_eq!(proto.len(), 1);
}

#[test]
fn test_weights_with_optimizer_unsupported() {
    let mut graph = GraphInner::new();
    let w = graph
        .new_weights(
            "w",
            WeightsArgs::new().optimizer(Optimizer::new("Adam", FieldArgs::new())),
        )
        .unwrap();
    assert_err!(graph.export_weights(w), ProtoError::Unsupported(_));

    let fc = graph
        .new_layer("FullyConnected", LayerArgs::new().weights(w))
        .unwrap();
    let parts = ModelParts::new().layers([fc]);
    assert_err!(
        graph.build_model(1, 1, &parts, &ExportConfig::default()),
        ProtoError::Unsupported(_)
    );
}

#[test]
fn test_shared_weights_exported_once() {
    let mut graph = GraphInner::new();
    let shared = graph.new_weights("shared", WeightsArgs::new()).unwrap();
    let a = graph
        .new_layer("FullyConnected", LayerArgs::new().name("a").weights(shared))
        .unwrap();
    graph
        .new_layer(
            "FullyConnected",
            LayerArgs::new().name("b").parent(a).weights(shared),
        )
        .unwrap();

    let parts = ModelParts::new().layers([a]).weights([shared]);
    let model = graph
        .build_model(8, 1, &parts, &ExportConfig::default())
        .unwrap();
    assert_eq!(model.messages("layer").len(), 2);
    assert_eq!(model.messages("weights").len(), 1);
}

#[test]
fn test_distinct_weights_with_same_name_both_exported() {
    let mut graph = GraphInner::new();
    let w1 = graph.new_weights("w", WeightsArgs::new()).unwrap();
    let w2 = graph.new_weights("w", WeightsArgs::new()).unwrap();
    let a = graph
        .new_layer("FullyConnected", LayerArgs::new().weights(w1))
        .unwrap();
    graph
        .new_layer("FullyConnected", LayerArgs::new().parent(a).weights(w2))
        .unwrap();

    // 按句柄去重：同名但不同的两组权重都会导出
    let model = graph
        .build_model(1, 1, &ModelParts::new().layers([a]), &ExportConfig::default())
        .unwrap();
    assert_eq!(model.messages("weights").len(), 2);
}

#[test]
fn test_weights_order_explicit_first() {
    let mut graph = GraphInner::new();
    let w_fc = graph.new_weights("w_fc", WeightsArgs::new()).unwrap();
    let extra = graph.new_weights("extra", WeightsArgs::new()).unwrap();
    let fc = graph
        .new_layer("FullyConnected", LayerArgs::new().weights(w_fc))
        .unwrap();

    let parts = ModelParts::new().layers([fc]).weights([extra]);
    let model = graph
        .build_model(8, 1, &parts, &ExportConfig::default())
        .unwrap();
    let names: Vec<_> = model
        .messages("weights")
        .iter()
        .map(|w| w.scalar("name").and_then(Value::as_str).unwrap().to_string())
        .collect();
    assert_eq!(names, ["extra", "w_fc"]);
}

#[test]
fn test_render_minimal_model() {
    let mut graph = GraphInner::new();
    let (data, fc) = input_and_fc(&mut graph);
    let parts = ModelParts::new()
        .layers([data])
        .objective_function(ObjectiveFunction::from_terms([fc]));

    let document = graph
        .build_document(64, 10, &parts, &ExportConfig::default())
        .unwrap();
    let expected = "\
model {
  mini_batch_size: 64
  block_size: 256
  num_epochs: 10
  objective_function {
    layer_term {
      scale_factor: 1.0
      layer: \"fc\"
    }
  }
  layer {
    name: \"data\"
    children: \"fc\"
    data_layout: \"data_parallel\"
    input {
    }
  }
  layer {
    name: \"fc\"
    parents: \"data\"
    data_layout: \"data_parallel\"
    weights: \"fc_w\"
    fully_connected {
      num_neurons: 10
    }
  }
  weights {
    name: \"fc_w\"
    he_normal_initializer {
    }
  }
}
";
    assert_eq!(document.render(), expected);
}

#[test]
fn test_render_is_deterministic() {
    let mut graph = GraphInner::new();
    let (data, fc) = input_and_fc(&mut graph);
    let parts = ModelParts::new()
        .layers([data])
        .objective_function(ObjectiveFunction::from_terms([fc]))
        .metrics([Metric::new(fc)]);
    let config = ExportConfig::default();
    let first = graph.build_document(32, 2, &parts, &config).unwrap().render();
    let second = graph.build_document(32, 2, &parts, &config).unwrap().render();
    assert_eq!(first, second);
}

#[test]
fn test_missing_objective_exports_empty_message() {
    let mut graph = GraphInner::new();
    let (data, _) = input_and_fc(&mut graph);
    let model = graph
        .build_model(1, 1, &ModelParts::new().layers([data]), &ExportConfig::default())
        .unwrap();
    assert!(model.message("objective_function").unwrap().is_empty());
    assert!(model.messages("metric").is_empty());
    assert!(model.messages("callback").is_empty());
}

#[test]
fn test_metrics_and_callbacks_in_given_order() {
    let mut graph = GraphInner::new();
    let (data, fc) = input_and_fc(&mut graph);
    let print = graph
        .new_callback("CallbackPrint", &FieldArgs::new().with("interval", 5))
        .unwrap();
    let timer = graph.new_callback("CallbackTimer", &FieldArgs::new()).unwrap();

    let parts = ModelParts::new()
        .layers([data])
        .metrics([
            Metric::new(fc).with_name("accuracy").with_unit("%"),
            Metric::new(data),
        ])
        .callbacks([print, timer]);
    let model = graph
        .build_model(1, 1, &parts, &ExportConfig::default())
        .unwrap();

    let metrics = model.messages("metric");
    assert_eq!(metrics.len(), 2);
    let first = metrics[0].message("layer_metric").unwrap();
    assert_eq!(first.scalar("name"), Some(&Value::from("accuracy")));
    assert_eq!(first.scalar("layer"), Some(&Value::from("fc")));
    assert_eq!(first.scalar("unit"), Some(&Value::from("%")));
    let second = metrics[1].message("layer_metric").unwrap();
    assert_eq!(second.scalar("name"), Some(&Value::from("data")));

    let callbacks = model.messages("callback");
    assert_eq!(callbacks.len(), 2);
    let print = callbacks[0].message("print").unwrap();
    assert_eq!(print.scalar("interval"), Some(&Value::Int(5)));
    assert!(callbacks[1].message("timer").is_some());
}

#[test]
fn test_unresolved_layers_by_config() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let other = identity(&mut graph, "other", &[]);
    identity(&mut graph, "b", &[a, other]);
    let parts = ModelParts::new().layers([a]);

    assert_err!(
        graph.build_model(1, 1, &parts, &ExportConfig::default()),
        ProtoError::UnresolvedLayers(_)
    );

    let lenient = ExportConfig {
        strict_traversal: false,
        ..ExportConfig::default()
    };
    let model = graph.build_model(1, 1, &parts, &lenient).unwrap();
    assert_eq!(model.messages("layer").len(), 1);
}

#[test]
fn test_custom_document_type() {
    let mut graph = GraphInner::new();
    let (data, _) = input_and_fc(&mut graph);
    let parts = ModelParts::new().layers([data]);

    let config = ExportConfig {
        document_type: "Model".to_string(),
        ..ExportConfig::default()
    };
    // Model 消息中没有 model 字段
    assert_err!(
        graph.build_document(1, 1, &parts, &config),
        ProtoError::UnknownField("Model", "model")
    );
}
