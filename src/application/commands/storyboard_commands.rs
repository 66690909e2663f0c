//! Storyboard Commands

/// 生成故事板：解析文本、分配音色、逐行合成、生成音效/音乐提示
#[derive(Debug, Clone)]
pub struct GenerateStoryboard {
    /// 原始剧本或散文文本
    pub script_text: String,
    /// 是否生成故事板图片；None 时按配置默认
    pub include_images: Option<bool>,
}
