use super::{assert_parents_first, identity};
use crate::assert_err;
use crate::errors::ProtoError;
use crate::nn::GraphInner;

#[test]
fn test_chain() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a]);
    let c = identity(&mut graph, "c", &[b]);
    assert_eq!(graph.traverse_layer_graph_strict(&[a]).unwrap(), [a, b, c]);
}

#[test]
fn test_diamond_waits_for_all_parents() {
    // a -> b -> d
    // a -> c -> d
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a]);
    let c = identity(&mut graph, "c", &[a]);
    let d = identity(&mut graph, "d", &[b, c]);

    let order = graph.traverse_layer_graph_strict(&[a]).unwrap();
    assert_eq!(order.len(), 4);
    assert_eq!(order[0], a);
    assert_eq!(order[3], d);
    assert_parents_first(&graph, &order);
}

#[test]
fn test_siblings_pop_in_stack_order() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a]);
    let c = identity(&mut graph, "c", &[a]);
    // 后入栈的子层先弹出
    assert_eq!(graph.traverse_layer_graph_strict(&[a]).unwrap(), [a, c, b]);
}

#[test]
fn test_larger_graph_property() {
    // 两个输入、多层汇合的网络
    let mut graph = GraphInner::new();
    let x = identity(&mut graph, "x", &[]);
    let y = identity(&mut graph, "y", &[]);
    let x1 = identity(&mut graph, "x1", &[x]);
    let y1 = identity(&mut graph, "y1", &[y]);
    let xy = identity(&mut graph, "xy", &[x1, y1]);
    let x2 = identity(&mut graph, "x2", &[x1]);
    let out = identity(&mut graph, "out", &[xy, x2, y]);
    let loss = identity(&mut graph, "loss", &[out, x]);

    let order = graph.traverse_layer_graph_strict(&[x, y]).unwrap();
    assert_eq!(order.len(), 8);
    assert_eq!(order.last(), Some(&loss));
    assert_parents_first(&graph, &order);
}

#[test]
fn test_seed_that_is_descendant_of_another_seed() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a]);
    let c = identity(&mut graph, "c", &[b]);
    // c 和 b 作为种子给出，但仍须排在 a 之后，且不重复
    let order = graph.traverse_layer_graph_strict(&[c, a, b, a]).unwrap();
    assert_eq!(order, [a, b, c]);
}

#[test]
fn test_duplicate_edges_emit_once() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a, a]);
    let c = identity(&mut graph, "c", &[b]);
    graph.add_child(a, c).unwrap();
    let order = graph.traverse_layer_graph_strict(&[a]).unwrap();
    assert_eq!(order, [a, b, c]);
}

#[test]
fn test_seed_with_parent_outside_seed_set() {
    // 种子层自身的上游不在可达集中时，种子照常输出
    let mut graph = GraphInner::new();
    let upstream = identity(&mut graph, "upstream", &[]);
    let a = identity(&mut graph, "a", &[upstream]);
    let b = identity(&mut graph, "b", &[a]);
    assert_eq!(graph.traverse_layer_graph_strict(&[a]).unwrap(), [a, b]);
}

#[test]
fn test_dependency_outside_seed_set() {
    // b 依赖的 other 不可达：宽松模式丢弃 b 及其下游，严格模式报错
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let other = identity(&mut graph, "other", &[]);
    let b = identity(&mut graph, "b", &[a, other]);
    let c = identity(&mut graph, "c", &[b]);

    let traversal = graph.traverse(&[a]).unwrap();
    assert_eq!(traversal.order, [a]);
    assert_eq!(traversal.unresolved, [b, c]);
    assert!(!traversal.is_complete());

    assert_eq!(graph.traverse_layer_graph(&[a]).unwrap(), [a]);
    assert_err!(
        graph.traverse_layer_graph_strict(&[a]),
        ProtoError::UnresolvedLayers(names) if names == &["b".to_string(), "c".to_string()]
    );

    // 把 other 也作为种子后即可完整遍历
    let order = graph.traverse_layer_graph_strict(&[a, other]).unwrap();
    assert_eq!(order.len(), 4);
    assert_parents_first(&graph, &order);
}

#[test]
fn test_cycle_is_detected() {
    let mut graph = GraphInner::new();
    let a = identity(&mut graph, "a", &[]);
    let b = identity(&mut graph, "b", &[a]);
    let c = identity(&mut graph, "c", &[b]);
    graph.add_parent(b, c).unwrap();

    let traversal = graph.traverse(&[a]).unwrap();
    assert_eq!(traversal.order, [a]);
    assert_eq!(traversal.unresolved, [b, c]);
    assert_err!(
        graph.traverse_layer_graph_strict(&[a]),
        ProtoError::UnresolvedLayers(_)
    );
}

#[test]
fn test_empty_and_invalid_seeds() {
    let mut graph = GraphInner::new();
    identity(&mut graph, "a", &[]);
    assert!(graph.traverse_layer_graph_strict(&[]).unwrap().is_empty());
    let mut other = GraphInner::new();
    let foreign = identity(&mut other, "a", &[]);
    assert_err!(graph.traverse(&[foreign]), ProtoError::LayerNotFound(_));
}
