//! JSON 节点编辑库
//!
//! 按地址读取文档中的单个节点、渲染为可编辑文本，保存时与旧值合并并写回完整文档。

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::data_core::{AppError, AppState, DocumentStore};
pub use model::formatter::{to_editable_text, to_path_text};
pub use model::merge::combine;
pub use model::path::{get, parse_address, set, set_in_place, Address, PathSegment};
pub use model::session::{EditSession, SessionState};
pub use model::shadow_tree::{build_shadow_tree, node_fields, JsonTreeNode, NodeField, NodeKind};
