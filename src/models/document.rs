use crate::models::SourceAttribution;

/// 从回答文本中提取出的结构化文档
///
/// 每个回答重新计算一次，构造后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredDocument {
    pub title: String,
    pub summary: String,
    /// 最多 5 条
    pub key_points: Vec<String>,
    pub code_examples: Vec<String>,
    pub related_content: Vec<String>,
    pub source: Option<SourceAttribution>,
}

impl StructuredDocument {
    /// 是否除标题和摘要外没有任何结构
    pub fn is_plain(&self) -> bool {
        self.key_points.is_empty() && self.code_examples.is_empty() && self.related_content.is_empty()
    }
}
