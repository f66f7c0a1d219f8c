mod export;
mod traverse;

use crate::nn::{GraphInner, LayerArgs, LayerId};

/// 在图中按名称创建一个 Identity 层，并连到给定的父层
pub(super) fn identity(graph: &mut GraphInner, name: &str, parents: &[LayerId]) -> LayerId {
    graph
        .new_layer(
            "Identity",
            LayerArgs::new().name(name).parents(parents.iter().copied()),
        )
        .unwrap()
}

/// 检查遍历结果：无重复，且每条边（两端都在结果中）父层在前
pub(super) fn assert_parents_first(graph: &GraphInner, order: &[LayerId]) {
    let position = |id: LayerId| order.iter().position(|&x| x == id);
    for (i, &id) in order.iter().enumerate() {
        assert_eq!(position(id), Some(i), "层{id}在遍历结果中重复出现");
        for &parent in graph.layer_parents(id).unwrap() {
            if let Some(p) = position(parent) {
                assert!(p < i, "父层{parent}应排在{id}之前");
            }
        }
    }
}
