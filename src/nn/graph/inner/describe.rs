/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : GraphInner describe/summary 相关方法
 */

use super::GraphInner;
use crate::errors::ProtoError;
use crate::nn::descriptor::{GraphDescriptor, LayerDescriptor, WeightsDescriptor};
use std::path::Path;

impl GraphInner {
    // ========== 图描述（describe）==========

    /// 导出图的描述符（用于序列化、调试）
    ///
    /// # 示例
    /// ```ignore
    /// let descriptor = graph.describe();
    /// println!("{}", descriptor.to_json().unwrap());
    /// ```
    pub fn describe(&self) -> GraphDescriptor {
        let mut descriptor = GraphDescriptor::new(&self.name);

        for (index, layer) in self.layers.iter().enumerate() {
            let weights = layer
                .weights
                .iter()
                .filter_map(|&w| self.weights_name(w).ok())
                .map(str::to_string)
                .collect();
            let hint_layer = layer
                .hint_layer
                .and_then(|h| self.layer_name(h).ok())
                .map(str::to_string);
            let set_fields = layer
                .kind
                .class()
                .field_names()
                .filter(|f| matches!(layer.kind.get(f), Ok(Some(_))))
                .map(str::to_string)
                .collect();

            descriptor.add_layer(LayerDescriptor {
                id: index,
                name: layer.name.clone(),
                layer_type: layer.kind.type_name().to_string(),
                data_layout: layer.data_layout.as_str().to_string(),
                parents: layer.parents.iter().map(|p| p.index).collect(),
                weights,
                hint_layer,
                set_fields,
            });
        }

        for (index, weights) in self.weights.iter().enumerate() {
            descriptor.add_weights(WeightsDescriptor {
                id: index,
                name: weights.name.clone(),
                initializer: weights
                    .initializer
                    .as_ref()
                    .map(|i| i.type_name().to_string()),
            });
        }

        descriptor
    }

    // ========== 模型摘要（summary）==========

    /// 将模型摘要保存到文件
    ///
    /// 根据文件扩展名自动选择格式：
    /// - `.md` → Markdown 表格
    /// - 其他（`.txt` 等）→ Unicode 文本表格
    pub fn save_summary<P: AsRef<Path>>(&self, path: P) -> Result<(), ProtoError> {
        let path = path.as_ref();
        let summary = match path.extension().and_then(|e| e.to_str()) {
            Some("md") => self.summary_markdown(),
            _ => self.summary_string(),
        };
        std::fs::write(path, summary)?;
        Ok(())
    }

    /// 返回模型摘要的 Markdown 格式字符串
    pub fn summary_markdown(&self) -> String {
        let desc = self.describe();
        let mut output = String::new();

        output.push_str(&format!("# 模型摘要: {}\n\n", desc.name));
        output.push_str("| 层名称 | 类型 | 数据布局 | 权重 | 父层 |\n");
        output.push_str("|--------|------|----------|------|------|\n");

        for layer in &desc.layers {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                layer.name,
                layer.layer_type,
                layer.data_layout,
                Self::format_list(&layer.weights),
                Self::format_parent_names(&desc, &layer.parents)
            ));
        }

        output.push_str(&format!(
            "\n**层数**: {}  \n**权重组数**: {}\n",
            desc.layers.len(),
            desc.weights.len()
        ));
        output
    }

    /// 返回模型摘要字符串（Unicode 文本表格，用于控制台输出）
    pub fn summary_string(&self) -> String {
        let desc = self.describe();

        let rows: Vec<[String; 5]> = desc
            .layers
            .iter()
            .map(|l| {
                [
                    l.name.clone(),
                    l.layer_type.clone(),
                    l.data_layout.clone(),
                    Self::format_list(&l.weights),
                    Self::format_parent_names(&desc, &l.parents),
                ]
            })
            .collect();
        let header = ["层名称", "类型", "数据布局", "权重", "父层"];

        // 各列宽度（至少 8）
        let mut widths = [8usize; 5];
        for (i, width) in widths.iter_mut().enumerate() {
            let column = rows.iter().map(|r| Self::display_width(&r[i]));
            *width = column
                .chain(std::iter::once(Self::display_width(header[i])))
                .max()
                .unwrap_or(8)
                .max(8);
        }

        let line = |left: &str, mid: &str, right: &str| {
            let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", parts.join(mid))
        };
        let row = |cells: &[&str]| {
            let parts: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w - Self::display_width(c))))
                .collect();
            format!("│{}│\n", parts.join("│"))
        };

        let mut output = String::new();
        output.push_str(&line("┌", "┬", "┐"));
        output.push_str(&row(&header[..]));
        output.push_str(&line("├", "┼", "┤"));
        for r in &rows {
            let cells: Vec<&str> = r.iter().map(String::as_str).collect();
            output.push_str(&row(cells.as_slice()));
        }
        output.push_str(&line("└", "┴", "┘"));
        output.push_str(&format!(
            "层数: {}，权重组数: {}\n",
            desc.layers.len(),
            desc.weights.len()
        ));
        output
    }

    fn format_list(items: &[String]) -> String {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    }

    /// 格式化父层名称列表
    fn format_parent_names(desc: &GraphDescriptor, parent_ids: &[usize]) -> String {
        if parent_ids.is_empty() {
            "-".to_string()
        } else {
            parent_ids
                .iter()
                .filter_map(|&id| desc.layer_name(id))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// 计算字符串显示宽度（考虑中文字符）
    fn display_width(s: &str) -> usize {
        s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
    }
}
