use super::outcome::{MissingReason, StemOutcome, TallImage};

/// 一次运行的汇总结果
///
/// 四类异常都按处理顺序追加，不去重。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// 已处理的文件数量
    pub processed: usize,
    /// 缺少商品图片
    pub missing_images: Vec<(String, MissingReason)>,
    /// 图片高于容器
    pub too_tall: Vec<TallImage>,
    /// 单个页面包含多张图片
    pub multiple_images: Vec<String>,
    /// 未知场景：文件名与错误信息
    pub unknown_scenarios: Vec<(String, String)>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录单个文件的处理结果
    pub fn record(&mut self, stem: &str, outcome: StemOutcome) {
        self.processed += 1;

        match outcome {
            StemOutcome::Inspected(findings) => {
                if findings.has_multiple_images() {
                    self.multiple_images.push(stem.to_string());
                }
                self.too_tall.extend(findings.too_tall);
            }
            StemOutcome::MissingImage(reason) => {
                self.missing_images.push((stem.to_string(), reason));
            }
            StemOutcome::Failed(detail) => {
                self.unknown_scenarios.push((stem.to_string(), detail));
            }
        }
    }

    pub fn anomaly_count(&self) -> usize {
        self.missing_images.len()
            + self.too_tall.len()
            + self.multiple_images.len()
            + self.unknown_scenarios.len()
    }

    /// 缺少图片的文件名（按记录顺序）
    pub fn missing_stems(&self) -> Vec<&str> {
        self.missing_images.iter().map(|(stem, _)| stem.as_str()).collect()
    }

    /// 图片过高的文件名，同一文件可能出现多次
    pub fn too_tall_stems(&self) -> Vec<&str> {
        self.too_tall.iter().map(|t| t.stem.as_str()).collect()
    }
}
