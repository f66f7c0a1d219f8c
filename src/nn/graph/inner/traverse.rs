/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 层图的拓扑遍历
 *
 * 从种子层出发做深度优先遍历，但一个层只有在它的所有父层都已访问后才会入栈，
 * 因此输出中每个层都排在它的全部父层之后。同层兄弟之间按栈序（后入先出）。
 *
 * 种子层本身的父层若在可达集之外（例如输入层的上游），不计入“已就绪”的判定；
 * 非种子层的父层则必须全部被访问。始终无法就绪的层（环、依赖种子集之外的层）
 * 记为未解析。
 */

use super::GraphInner;
use crate::errors::ProtoError;
use crate::nn::LayerId;
use indexmap::IndexSet;
use std::collections::HashSet;

/// 一次遍历的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// 父层先于子层的输出顺序（无重复）
    pub order: Vec<LayerId>,
    /// 从种子可达、但父层始终未被全部访问的层（按发现顺序）
    pub unresolved: Vec<LayerId>,
}

impl Traversal {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl GraphInner {
    /// 沿子边从种子出发的可达集（按发现顺序）
    fn reachable_from(&self, seeds: &[LayerId]) -> Result<IndexSet<LayerId>, ProtoError> {
        let mut reachable = IndexSet::new();
        let mut stack: Vec<LayerId> = seeds.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !reachable.insert(id) {
                continue;
            }
            for &child in self.layer_children(id)?.iter().rev() {
                if !reachable.contains(&child) {
                    stack.push(child);
                }
            }
        }
        Ok(reachable)
    }

    /// 遍历层图，返回输出顺序与未解析的层
    pub fn traverse(&self, seeds: &[LayerId]) -> Result<Traversal, ProtoError> {
        let reachable = self.reachable_from(seeds)?;
        let seed_set: HashSet<LayerId> = seeds.iter().copied().collect();
        let mut visited: HashSet<LayerId> = HashSet::new();

        let is_ready = |id: LayerId, visited: &HashSet<LayerId>| -> Result<bool, ProtoError> {
            let is_seed = seed_set.contains(&id);
            Ok(self
                .layer_parents(id)?
                .iter()
                .all(|p| visited.contains(p) || (is_seed && !reachable.contains(p))))
        };

        // 种子去重后逆序入栈，使第一个种子最先弹出
        let mut stack = Vec::new();
        let mut seen_seeds = HashSet::new();
        for &seed in seeds.iter().rev() {
            if seen_seeds.insert(seed) && is_ready(seed, &visited)? {
                stack.push(seed);
            }
        }

        let mut order = Vec::with_capacity(reachable.len());
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            for &child in self.layer_children(id)? {
                if !visited.contains(&child) && is_ready(child, &visited)? {
                    stack.push(child);
                }
            }
        }

        let unresolved = reachable
            .into_iter()
            .filter(|id| !visited.contains(id))
            .collect();
        Ok(Traversal { order, unresolved })
    }

    /// 宽松遍历：未解析的层被丢弃，只记录 warn 日志
    pub fn traverse_layer_graph(&self, seeds: &[LayerId]) -> Result<Vec<LayerId>, ProtoError> {
        let traversal = self.traverse(seeds)?;
        for &id in &traversal.unresolved {
            log::warn!(
                "层{}的父层未被全部访问（存在环或依赖了种子集之外的层），已从输出中丢弃",
                self.layer_name(id)?
            );
        }
        Ok(traversal.order)
    }

    /// 严格遍历：存在未解析的层时返回`UnresolvedLayers`
    pub fn traverse_layer_graph_strict(&self, seeds: &[LayerId]) -> Result<Vec<LayerId>, ProtoError> {
        let traversal = self.traverse(seeds)?;
        if !traversal.is_complete() {
            let names = traversal
                .unresolved
                .iter()
                .map(|&id| self.layer_name(id).map(str::to_string))
                .collect::<Result<Vec<_>, _>>()?;
            return Err(ProtoError::UnresolvedLayers(names));
        }
        Ok(traversal.order)
    }
}
