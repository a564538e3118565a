//! 合并策略：对象浅合并，其余一律整体替换

use serde_json::Value;

/// 将编辑后的值与地址处的旧值合并
///
/// 两边都是对象时做浅层键合并：保留旧键顺序，新值覆盖同名键，新增键追加在后；
/// 否则（旧值缺失、为标量/数组/null，或新值不是对象）直接返回 `new`。
/// 编辑框只暴露对象的标量字段，浅合并不会丢掉用户没看到的嵌套子节点。
pub fn combine(old: Option<Value>, new: Value) -> Value {
    match (old, new) {
        (Some(Value::Object(mut merged)), Value::Object(overlay)) => {
            merged.extend(overlay);
            Value::Object(merged)
        }
        (_, new) => new,
    }
}
