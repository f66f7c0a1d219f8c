/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Graph 模块：层图的构建、遍历与导出
 *
 * 公开 API：
 * - `Graph`: 用户级句柄
 * - `GraphInner`: 底层实现（按句柄操作层与权重）
 * - `LayerId` / `WeightsId`: 非拥有型句柄
 */

mod handle;
mod inner;
mod types;

pub use handle::Graph;
pub use inner::{GraphInner, Traversal};
pub use types::{DataLayout, LayerId, WeightsId};
