//! IO helper: safe file read/write for JSON documents

use std::{fs, path::Path};

use crate::model::data_core::AppError;

/// 从文件读取文档文本（不做解析）
pub fn read_document_text(p: &Path) -> Result<String, AppError> {
    Ok(fs::read_to_string(p)?)
}

/// 将文档文本写入文件，末尾补换行
pub fn write_document_text(p: &Path, text: &str) -> Result<(), AppError> {
    let mut out = String::with_capacity(text.len() + 1);
    out.push_str(text);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    fs::write(p, out)?;
    Ok(())
}
