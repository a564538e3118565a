//! AppState：文档文本的持有者，实现编辑会话所需的读取/回写接口

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::model::path::{get, PathSegment};
use crate::model::shadow_tree::{build_shadow_tree, node_fields, JsonTreeNode, NodeField};
use crate::utils::fs::{read_document_text, write_document_text};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("文档JSON解析失败: {0}")]
    MalformedDocument(#[source] serde_json::Error),
    #[error("编辑内容不是合法JSON: {0}")]
    MalformedDraft(#[source] serde_json::Error),
    #[error("JSON序列化失败: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("地址无效: {0}")]
    InvalidAddress(String),
    #[error("状态错误: {0}")]
    State(String),
}

/// 编辑会话的外部协作者：提供当前文档文本，接收更新后的文档文本
pub trait DocumentStore {
    /// 当前完整文档的 JSON 文本
    fn document_text(&self) -> String;

    /// 以新文本替换整个文档，并通知其他视图
    fn replace_document(&mut self, text: String);
}

/// 解析完整文档文本
pub fn parse_document(text: &str) -> Result<Value, AppError> {
    serde_json::from_str(text).map_err(AppError::MalformedDocument)
}

#[derive(Debug, Default)]
pub struct AppState {
    pub original_file_path: Option<PathBuf>,
    /// 当前文档文本（以文本为准，每次保存都重新解析）
    pub text: String,
    /// 每次 `replace_document` 递增，供宿主察觉并发写入
    pub revision: u64,
    pub tree_flat: Vec<JsonTreeNode>,
}

impl AppState {
    /// 加载JSON文件并构建影子树
    pub fn load_file(&mut self, p: &Path) -> Result<(), AppError> {
        let text = read_document_text(p)?;
        self.load_text(text)?;
        self.original_file_path = Some(p.to_path_buf());
        tracing::info!("文件加载成功: {}，{} 个节点", p.display(), self.tree_flat.len());
        Ok(())
    }

    /// 从文本加载文档，文本必须是合法JSON
    pub fn load_text(&mut self, text: impl Into<String>) -> Result<(), AppError> {
        let text = text.into();
        let dom = parse_document(&text)?;
        self.tree_flat = build_shadow_tree(&dom);
        self.text = text;
        self.revision = 0;
        Ok(())
    }

    /// 解析当前文档
    pub fn document(&self) -> Result<Value, AppError> {
        parse_document(&self.text)
    }

    /// 地址处节点的字段行；地址不存在时返回空（新路径，并非错误）
    pub fn fields_at(&self, address: &[PathSegment]) -> Result<Vec<NodeField>, AppError> {
        let dom = self.document()?;
        match get(&dom, address) {
            Some(v) => Ok(node_fields(v)),
            None => {
                tracing::debug!("地址暂无值，按空节点处理: {:?}", address);
                Ok(Vec::new())
            }
        }
    }

    /// 将当前文档保存到指定路径
    pub fn save_to_file(&self, path: &Path) -> Result<(), AppError> {
        if self.text.is_empty() {
            return Err(AppError::State("文档尚未加载".into()));
        }
        write_document_text(path, &self.text)?;
        tracing::info!("JSON文件已保存到: {}", path.display());
        Ok(())
    }

    /// 将当前文档保存到原始文件路径
    pub fn save_to_original_file(&self) -> Result<(), AppError> {
        let original_path = self
            .original_file_path
            .as_ref()
            .ok_or_else(|| AppError::State("原始文件路径未设置".into()))?;
        self.save_to_file(original_path)
    }
}

impl DocumentStore for AppState {
    fn document_text(&self) -> String {
        self.text.clone()
    }

    fn replace_document(&mut self, text: String) {
        // 变更后重建影子树（后续可优化为局部刷新）
        match parse_document(&text) {
            Ok(dom) => self.tree_flat = build_shadow_tree(&dom),
            Err(e) => {
                tracing::warn!("回写的文档无法解析，影子树已清空: {}", e);
                self.tree_flat.clear();
            }
        }
        self.text = text;
        self.revision += 1;
        tracing::debug!("文档已替换，revision = {}", self.revision);
    }
}
