//! 节点文本渲染：字段行 → 可编辑文本，地址 → `$["a"][0]` 形式的路径文本

use serde_json::{Map, Value};

use crate::model::path::PathSegment;
use crate::model::shadow_tree::NodeField;

/// 编辑框中显示的文本
///
/// - 无字段：`{}`
/// - 单个无键字段（裸标量）：该值的 JSON 文本，如 `42`、`"abc"`
/// - 其余：只保留非容器且带键的字段，输出 2 空格缩进的 JSON 对象
///
/// 输出总能被 JSON 解析器重新读回。
pub fn to_editable_text(fields: &[NodeField]) -> String {
    match fields {
        [] => "{}".to_string(),
        [only] if is_unkeyed(only) => only.value.to_string(),
        _ => {
            let obj: Map<String, Value> = fields
                .iter()
                .filter(|f| !f.kind.is_container())
                .filter_map(|f| match f.key.as_deref() {
                    Some(k) if !k.is_empty() => Some((k.to_string(), f.value.clone())),
                    _ => None,
                })
                .collect();
            format!("{:#}", Value::Object(obj))
        }
    }
}

// 空键与缺失键同样视为无键
fn is_unkeyed(field: &NodeField) -> bool {
    field.key.as_deref().map_or(true, str::is_empty)
}

/// 地址的可读形式：空地址为 `$`，下标不加引号，键名按 JSON 字符串转义加引号
pub fn to_path_text(address: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in address {
        match segment {
            PathSegment::Index(i) => out.push_str(&format!("[{}]", i)),
            PathSegment::Key(k) => out.push_str(&format!("[{}]", Value::from(k.as_str()))),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shadow_tree::{node_fields, NodeKind};
    use serde_json::json;

    #[test]
    fn test_empty_fields_render_empty_object() {
        assert_eq!(to_editable_text(&[]), "{}");
    }

    #[test]
    fn test_bare_scalar_renders_raw() {
        assert_eq!(to_editable_text(&[NodeField::bare(json!(42))]), "42");
        assert_eq!(to_editable_text(&[NodeField::bare(json!(true))]), "true");
        assert_eq!(to_editable_text(&[NodeField::bare(Value::Null)]), "null");
        assert_eq!(to_editable_text(&[NodeField::bare(json!("苹果"))]), "\"苹果\"");
    }

    #[test]
    fn test_container_fields_are_excluded() {
        let fields = vec![
            NodeField::keyed("a", json!(1)),
            NodeField { key: Some("b".into()), value: json!([1, 2]), kind: NodeKind::Array },
        ];
        assert_eq!(to_editable_text(&fields), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_unkeyed_rows_dropped_in_object_form() {
        let fields = vec![
            NodeField::bare(json!(1)),
            NodeField::keyed("name", json!("梨")),
            NodeField::bare(json!(2)),
        ];
        assert_eq!(to_editable_text(&fields), "{\n  \"name\": \"梨\"\n}");
    }

    #[test]
    fn test_only_container_fields_render_empty_object() {
        let fields = node_fields(&json!({"list": [1], "obj": {}}));
        assert_eq!(to_editable_text(&fields), "{}");
    }

    #[test]
    fn test_field_order_follows_rows() {
        let fields = node_fields(&json!({"z": 1, "a": "x", "m": null}));
        assert_eq!(
            to_editable_text(&fields),
            "{\n  \"z\": 1,\n  \"a\": \"x\",\n  \"m\": null\n}"
        );
    }

    #[test]
    fn test_editable_text_parses_back() {
        let fields = node_fields(&json!({"title": "say \"hi\"", "n": 1.5}));
        let parsed: Value = serde_json::from_str(&to_editable_text(&fields)).unwrap();
        assert_eq!(parsed, json!({"title": "say \"hi\"", "n": 1.5}));
    }

    #[test]
    fn test_path_text() {
        assert_eq!(to_path_text(&[]), "$");
        assert_eq!(
            to_path_text(&[PathSegment::Key("fruits".into()), PathSegment::Index(0)]),
            r#"$["fruits"][0]"#
        );
        assert_eq!(
            to_path_text(&[PathSegment::Key("customer".into())]),
            r#"$["customer"]"#
        );
        assert_eq!(
            to_path_text(&[PathSegment::Key("a\"b".into()), PathSegment::Key("0".into())]),
            r#"$["a\"b"]["0"]"#
        );
    }
}
