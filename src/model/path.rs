//! 地址（Address）读写：按键名/索引序列从根定位节点，读取或回写其值

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::data_core::AppError;

/// 地址中的一段：对象键名或数组索引
///
/// 以 untagged 方式序列化，地址整体即 JSON 数组 `["customer", 0]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

/// 从根到目标节点的段序列，空序列表示根
pub type Address = Vec<PathSegment>;

impl PathSegment {
    /// 作为数组下标时的取值；键名仅在为规范十进制整数时可用作下标
    pub fn array_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(k) => canonical_index(k),
        }
    }

    /// 作为对象键名时的取值（下标按十进制文本）
    pub fn object_key(&self) -> String {
        match self {
            PathSegment::Index(i) => i.to_string(),
            PathSegment::Key(k) => k.clone(),
        }
    }

    fn empty_container(&self) -> Value {
        match self {
            PathSegment::Index(_) => Value::Array(Vec::new()),
            PathSegment::Key(_) => Value::Object(serde_json::Map::new()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{}", i),
            PathSegment::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(k: &str) -> Self {
        PathSegment::Key(k.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(k: String) -> Self {
        PathSegment::Key(k)
    }
}

/// "0"、"12" 可作下标；"01"、"+1"、"" 不行
fn canonical_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    key.parse().ok()
}

/// 解析 JSON 数组形式的地址文本，如 `["fruits", 0]`
pub fn parse_address(text: &str) -> Result<Address, AppError> {
    serde_json::from_str(text).map_err(|e| AppError::InvalidAddress(format!("{}: {}", text, e)))
}

fn child<'a>(value: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(&segment.object_key()),
        Value::Array(items) => segment.array_index().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// 按地址读取节点
///
/// 途中遇到 `null` 或缺失即停止并返回 `None`（表示该地址暂无值，并非错误）；
/// 对非容器取子段同样得到 `None`。空地址返回文档本身。
pub fn get<'a>(document: &'a Value, address: &[PathSegment]) -> Option<&'a Value> {
    let mut current = document;
    for segment in address {
        if current.is_null() {
            return None;
        }
        current = child(current, segment)?;
    }
    Some(current)
}

/// 写入时数组末尾最多补齐的 `null` 个数
pub const MAX_ARRAY_PADDING: usize = 1 << 16;

/// 沿地址只读预演一次写入，拒绝需要补齐过多 `null` 的下标
///
/// 在任何修改发生前检查，失败时文档保持原样。
fn check_array_padding(document: &Value, address: &[PathSegment]) -> Result<(), AppError> {
    let mut current = Some(document);
    for segment in address {
        let len = match current {
            Some(Value::Object(_)) => None,
            Some(Value::Array(items)) => segment.array_index().map(|_| items.len()),
            // 此处将新建容器：下标建空数组，键名建对象
            _ => match segment {
                PathSegment::Index(_) => Some(0),
                PathSegment::Key(_) => None,
            },
        };
        if let (Some(len), Some(index)) = (len, segment.array_index()) {
            if index.saturating_sub(len) > MAX_ARRAY_PADDING {
                return Err(AppError::InvalidAddress(format!(
                    "下标 {} 超出数组长度 {} 过多",
                    index, len
                )));
            }
        }
        current = current.and_then(|c| child(c, segment));
    }
    Ok(())
}

/// 取得 `container` 中 `segment` 对应的槽位，必要时先把 `container` 换成能容纳该段的空容器
///
/// 非容器（含 `null`）与无法按该段寻址的数组都会被替换，容器种类由段类型决定：
/// 下标建数组，键名建对象。越界下标以 `null` 补齐（补齐量已由 `check_array_padding` 限定）。
fn ensure_container_at<'a>(container: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    match (container, segment.array_index()) {
        (Value::Object(map), _) => map.entry(segment.object_key()).or_insert(Value::Null),
        (Value::Array(items), Some(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (slot, _) => {
            if !slot.is_null() {
                tracing::debug!("段 {} 处的旧值不可寻址，已替换为空容器", segment);
            }
            *slot = segment.empty_container();
            ensure_container_at(slot, segment)
        }
    }
}

/// 就地写入：沿地址逐段确保容器存在，最后一段覆盖写入 `value`
///
/// 下标超出数组长度超过 `MAX_ARRAY_PADDING` 时返回 `InvalidAddress`，文档不变。
pub fn set_in_place(document: &mut Value, address: &[PathSegment], value: Value) -> Result<(), AppError> {
    check_array_padding(document, address)?;
    let mut current = document;
    for segment in address {
        current = ensure_container_at(current, segment);
    }
    *current = value;
    Ok(())
}

/// 按地址写入并返回文档（取得所有权，调用方不再与其他读者共享该值）
///
/// 空地址直接以 `value` 替换整个文档。
pub fn set(mut document: Value, address: &[PathSegment], value: Value) -> Result<Value, AppError> {
    set_in_place(&mut document, address, value)?;
    Ok(document)
}
