//! 影子树（Shadow Tree）：展平文档中的每个节点，记录地址、类型与可编辑字段行

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::formatter::to_path_text;
use crate::model::path::{Address, PathSegment};

/// JSON 节点类型（与 UI 展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    #[serde(rename = "boolean")]
    Bool,
    Null,
}

impl NodeKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

/// 节点自身数据的一行
///
/// 单个无键行表示裸标量；多个有键行表示对象的直接成员。
/// 容器成员也会出现（`value` 为其子元素数量），但不进入编辑文本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl NodeField {
    pub fn bare(value: Value) -> Self {
        let kind = NodeKind::of(&value);
        Self { key: None, value, kind }
    }

    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        let kind = NodeKind::of(&value);
        Self { key: Some(key.into()), value, kind }
    }
}

fn child_count(v: &Value) -> usize {
    match v {
        Value::Object(m) => m.len(),
        Value::Array(a) => a.len(),
        _ => 0,
    }
}

// 超出 u32 的计数按 u32::MAX 显示
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// 生成某个值作为图节点时的字段行
///
/// - 标量：一行无键字段
/// - 对象：每个成员一行，容器成员只记录类型与子元素数量
/// - 数组：无自身字段（元素各自成为子节点）
pub fn node_fields(value: &Value) -> Vec<NodeField> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let kind = NodeKind::of(v);
                let row_value = if kind.is_container() {
                    Value::from(child_count(v))
                } else {
                    v.clone()
                };
                NodeField { key: Some(k.clone()), value: row_value, kind }
            })
            .collect(),
        Value::Array(_) => Vec::new(),
        scalar => vec![NodeField::bare(scalar.clone())],
    }
}

#[derive(Debug, Clone)]
pub struct JsonTreeNode {
    /// 节点在父级中的键名或索引的字符串形式
    pub name: String,
    /// 从根到该节点的地址（用于精确寻址与回写）
    pub path: Address,
    /// 节点类型
    pub kind: NodeKind,
    /// 子元素数量（对象字段数 / 数组长度）
    pub children: u32,
    /// 轻量预览（字符串截断、数字/布尔/空的简短描述）
    pub preview: String,
    /// 节点深度（用于缩进显示）
    pub depth: u32,
    /// 节点自身的字段行
    pub fields: Vec<NodeField>,
}

impl JsonTreeNode {
    pub fn path_text(&self) -> String {
        to_path_text(&self.path)
    }
}

fn preview_of(v: &Value) -> String {
    match v {
        Value::String(s) => {
            let s = s.trim();
            if s.chars().count() > 32 {
                let truncated: String = s.chars().take(32).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(m) => format!("{{..}} ({} keys)", m.len()),
        Value::Array(a) => format!("[..] ({} items)", a.len()),
    }
}

/// 从根 Value 构建全树影子索引（先序遍历）
pub fn build_shadow_tree(root: &Value) -> Vec<JsonTreeNode> {
    let mut out = Vec::with_capacity(1024);
    fn walk(out: &mut Vec<JsonTreeNode>, v: &Value, path: &mut Address, name: String) {
        out.push(JsonTreeNode {
            name,
            path: path.clone(),
            kind: NodeKind::of(v),
            children: saturating_u32(child_count(v)),
            preview: preview_of(v),
            depth: saturating_u32(path.len()),
            fields: node_fields(v),
        });
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    path.push(PathSegment::Key(k.clone()));
                    walk(out, child, path, k.clone());
                    path.pop();
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    path.push(PathSegment::Index(idx));
                    walk(out, child, path, format!("[{}]", idx));
                    path.pop();
                }
            }
            _ => {}
        }
    }

    walk(&mut out, root, &mut Vec::new(), "$".to_string());
    out
}
