//! 解析結果の表示モデル
//!
//! `AnalysisResult` から画面表示用の `ResultView` を作る純粋関数。
//! データがない・空のセクションは `None` になり、何も表示しない。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, Score};

/// スコアの色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    Negative,
    Warning,
    Positive,
}

impl ScoreTier {
    /// 大きいほど好ましい
    pub fn rank(&self) -> u8 {
        match self {
            ScoreTier::Negative => 0,
            ScoreTier::Warning => 1,
            ScoreTier::Positive => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Negative => "negative",
            ScoreTier::Warning => "warning",
            ScoreTier::Positive => "positive",
        }
    }
}

/// 色分けのしきい値（high以上: Positive, mid以上: Warning, それ未満: Negative）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreThresholds {
    high: u8,
    mid: u8,
}

impl ScoreThresholds {
    pub const DEFAULT: ScoreThresholds = ScoreThresholds { high: 85, mid: 60 };

    pub fn new(high: u8, mid: u8) -> Result<Self> {
        if mid > high || high > 100 {
            return Err(Error::Config(format!(
                "score thresholds must satisfy mid <= high <= 100 (got mid={mid}, high={high})"
            )));
        }
        Ok(Self { high, mid })
    }

    /// 厳しめの設定（high=90）
    pub fn strict() -> Self {
        Self { high: 90, mid: 60 }
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn mid(&self) -> u8 {
        self.mid
    }

    pub fn tier(&self, score: Score) -> ScoreTier {
        let value = score.value();
        if value >= self.high {
            ScoreTier::Positive
        } else if value >= self.mid {
            ScoreTier::Warning
        } else {
            ScoreTier::Negative
        }
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// タグの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagTone {
    Matched,
    Missing,
    Technical,
    Other,
}

impl TagTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagTone::Matched => "matched",
            TagTone::Missing => "missing",
            TagTone::Technical => "technical",
            TagTone::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub label: String,
    pub tone: TagTone,
}

/// 表示用モデル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub score: u8,
    pub tier: ScoreTier,
    pub summary: String,
    pub keywords: Option<Vec<Tag>>,
    pub missing_technical: Option<Vec<Tag>>,
    pub missing_other: Option<Vec<Tag>>,
    pub improvements: Option<Vec<String>>,
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn skill_tags(skills: Option<&Vec<String>>, tone: TagTone) -> Option<Vec<Tag>> {
    let tags: Vec<Tag> = skills?
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| Tag {
            label: s.clone(),
            tone,
        })
        .collect();
    non_empty(tags)
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult, thresholds: &ScoreThresholds) -> Self {
        let keywords = result.keywords_match.as_ref().and_then(|keywords| {
            non_empty(
                keywords
                    .iter()
                    .map(|k| Tag {
                        label: k.keyword.clone(),
                        tone: if k.matched { TagTone::Matched } else { TagTone::Missing },
                    })
                    .collect::<Vec<_>>(),
            )
        });

        let improvements = result.improvements.as_ref().and_then(|items| {
            non_empty(
                items
                    .iter()
                    .filter(|s| !s.trim().is_empty())
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        });

        Self {
            score: result.score.value(),
            tier: thresholds.tier(result.score),
            summary: result.summary.trim().to_string(),
            keywords,
            missing_technical: skill_tags(result.missing_technical_skills.as_ref(), TagTone::Technical),
            missing_other: skill_tags(result.missing_other_skills.as_ref(), TagTone::Other),
            improvements,
        }
    }

    pub fn matched_keyword_count(&self) -> usize {
        self.keywords
            .as_ref()
            .map(|tags| tags.iter().filter(|t| t.tone == TagTone::Matched).count())
            .unwrap_or(0)
    }
}
