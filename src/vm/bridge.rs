//! VM桥接层：把编辑会话与影子树渲染成终端可显示的文本

use crate::model::session::{EditSession, SessionState};
use crate::model::shadow_tree::JsonTreeNode;

// === 常量定义（消除魔法值） ===
pub const STATUS_LOADED: &str = "文件加载完成";
pub const STATUS_WRITE_BACK_SUCCESS: &str = "回写成功";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 节点弹窗内容：查看状态显示渲染文本，编辑状态显示草稿
pub fn render_session(session: &EditSession) -> String {
    let content = match session.state() {
        SessionState::Viewing => session.display_text(),
        SessionState::Editing => session.draft().to_string(),
    };
    format!("Content\n{}\n\nJSON Path\n{}", content, session.path_text())
}

/// 影子树列表：按深度缩进，每行 路径 / 类型 / 预览
pub fn render_tree(nodes: &[JsonTreeNode]) -> String {
    nodes
        .iter()
        .map(|node| {
            format!(
                "{}{}  {:?}  {}",
                "  ".repeat(node.depth as usize),
                node.path_text(),
                node.kind,
                node.preview
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
