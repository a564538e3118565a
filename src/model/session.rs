//! 节点编辑会话：查看 → 编辑 → 保存/取消
//!
//! 保存时总是重新读取存储中的当前文档，不使用打开会话时的快照。

use serde_json::Value;

use crate::model::data_core::{parse_document, AppError, DocumentStore};
use crate::model::formatter::{to_editable_text, to_path_text};
use crate::model::merge::combine;
use crate::model::path::{get, set_in_place, Address};
use crate::model::shadow_tree::NodeField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    address: Address,
    fields: Vec<NodeField>,
    state: SessionState,
    draft: String,
    open: bool,
}

impl EditSession {
    /// 打开节点：进入查看状态，草稿预置为当前渲染文本
    pub fn open(fields: Vec<NodeField>, address: Address) -> Self {
        let draft = to_editable_text(&fields);
        Self {
            address,
            fields,
            state: SessionState::Viewing,
            draft,
            open: true,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// 查看状态下显示的内容
    pub fn display_text(&self) -> String {
        to_editable_text(&self.fields)
    }

    pub fn path_text(&self) -> String {
        to_path_text(&self.address)
    }

    pub fn begin_edit(&mut self) {
        self.state = SessionState::Editing;
    }

    /// 更新草稿；仅编辑状态下生效
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.state != SessionState::Editing {
            tracing::debug!("非编辑状态，忽略草稿修改: {}", self.path_text());
            return;
        }
        self.draft = text.into();
    }

    /// 放弃草稿并回到查看状态，不写入任何内容
    pub fn cancel(&mut self) {
        self.state = SessionState::Viewing;
        self.draft = to_editable_text(&self.fields);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// 解析草稿、与当前值合并、写回完整文档并交给存储
    ///
    /// 任一文本解析失败时不写入，保持编辑状态与草稿，错误返回给调用方。
    pub fn save<S: DocumentStore + ?Sized>(&mut self, store: &mut S) -> Result<(), AppError> {
        if self.state != SessionState::Editing {
            return Err(AppError::State("当前不在编辑状态".into()));
        }

        let mut full = parse_document(&store.document_text()).inspect_err(|e| {
            tracing::error!("保存失败，文档无法解析: {}", e);
        })?;

        let draft = if self.draft.is_empty() { "{}" } else { self.draft.as_str() };
        let edited: Value = serde_json::from_str(draft).map_err(|e| {
            tracing::warn!("保存失败，编辑内容不是合法JSON: {}", e);
            AppError::MalformedDraft(e)
        })?;

        let current = get(&full, &self.address).cloned();
        let next = combine(current, edited);
        set_in_place(&mut full, &self.address, next)?;

        let serialized = serde_json::to_string_pretty(&full).map_err(AppError::Serialize)?;
        store.replace_document(serialized);
        tracing::info!("回写成功: {}", self.path_text());

        self.state = SessionState::Viewing;
        self.open = false;
        Ok(())
    }
}
