//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Score: 0〜100のマッチスコア
//! - KeywordMatch: キーワードと一致有無のペア
//! - AnalysisResult: 解析APIのレスポンス全体

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// マッチスコア（0〜100に丸める）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(100);

    /// 範囲外の値は0〜100にクランプする
    pub fn new(value: u8) -> Self {
        Score(value.min(100))
    }

    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Score(value.round().clamp(0.0, 100.0) as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreVisitor;

        impl<'de> Visitor<'de> for ScoreVisitor {
            type Value = Score;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a score between 0 and 100")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Score, E> {
                Ok(Score(v.min(100) as u8))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Score, E> {
                Ok(Score(v.clamp(0, 100) as u8))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Score, E> {
                Score::from_f64(v).ok_or_else(|| E::custom("score is not a finite number"))
            }

            // "82" や "82%" のような文字列スコア
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Score, E> {
                let trimmed = v.trim().trim_end_matches('%').trim();
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Score::from_f64)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(ScoreVisitor)
    }
}

/// キーワード一致情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub keyword: String,
    pub matched: bool,
}

impl KeywordMatch {
    pub fn new(keyword: impl Into<String>, matched: bool) -> Self {
        Self {
            keyword: keyword.into(),
            matched,
        }
    }
}

/// `{"Python": true}` と `{"Python": {"matched": true}}` の両方を受け付ける
#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordValue {
    Flag(bool),
    Detailed { matched: bool },
}

impl KeywordValue {
    fn matched(&self) -> bool {
        match self {
            KeywordValue::Flag(matched) => *matched,
            KeywordValue::Detailed { matched } => *matched,
        }
    }
}

/// キーワードマップを出現順のままVecへ読み込む
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Option<Vec<KeywordMatch>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeywordsVisitor;

    impl<'de> Visitor<'de> for KeywordsVisitor {
        type Value = Option<Vec<KeywordMatch>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of keyword to match flag")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut keywords = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((keyword, value)) = map.next_entry::<String, KeywordValue>()? {
                keywords.push(KeywordMatch::new(keyword, value.matched()));
            }
            Ok(Some(keywords))
        }
    }

    deserializer.deserialize_option(KeywordsVisitor)
}

fn serialize_keywords<S>(keywords: &Option<Vec<KeywordMatch>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match keywords {
        None => serializer.serialize_none(),
        Some(keywords) => {
            let mut map = serializer.serialize_map(Some(keywords.len()))?;
            for k in keywords {
                map.serialize_entry(&k.keyword, &k.matched)?;
            }
            map.end()
        }
    }
}

/// 解析APIのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: Score,

    #[serde(default)]
    pub summary: String,

    #[serde(
        default,
        deserialize_with = "deserialize_keywords",
        serialize_with = "serialize_keywords"
    )]
    pub keywords_match: Option<Vec<KeywordMatch>>,

    #[serde(default)]
    pub missing_technical_skills: Option<Vec<String>>,

    #[serde(default)]
    pub missing_other_skills: Option<Vec<String>>,

    #[serde(default)]
    pub improvements: Option<Vec<String>>,
}
