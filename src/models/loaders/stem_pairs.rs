use crate::error::{AppResult, AuditError};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// 从文件名列表中找出同时存在 `.html` 与 `.pdf` 的文件名主干
///
/// 结果保持输入（目录列举）顺序。
pub fn pair_file_names<S: AsRef<str>>(file_names: &[S]) -> Vec<String> {
    let names: HashSet<&str> = file_names.iter().map(|n| n.as_ref()).collect();

    file_names
        .iter()
        .filter_map(|name| name.as_ref().strip_suffix(".html"))
        .filter(|stem| names.contains(format!("{}.pdf", stem).as_str()))
        .map(str::to_string)
        .collect()
}

/// 扫描文件夹并返回所有成对文件的主干
///
/// 文件夹不可读时返回错误，而不是静默地返回空列表。
pub async fn scan_stem_pairs(folder: &Path) -> AppResult<Vec<String>> {
    let unreadable = |source| AuditError::FolderUnreadable {
        path: folder.to_path_buf(),
        source,
    };

    let mut file_names = Vec::new();
    let mut entries = fs::read_dir(folder).await.map_err(unreadable)?;

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        match entry.file_name().into_string() {
            Ok(name) => file_names.push(name),
            Err(name) => tracing::debug!("跳过非 UTF-8 文件名: {:?}", name),
        }
    }

    let stems = pair_file_names(&file_names);
    tracing::debug!(
        "目录 {} 中共 {} 个文件，{} 对可分析",
        folder.display(),
        file_names.len(),
        stems.len()
    );

    Ok(stems)
}
