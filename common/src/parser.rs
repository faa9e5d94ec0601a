//! 解析APIレスポンスパーサー
//!
//! モデル出力がそのまま返る場合に備え、前後の文章やコードブロックから
//! JSONオブジェクト部分を抽出してからデコードする

use crate::error::{Error, Result};
use crate::types::AnalysisResult;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// `keywords_match` の形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseSchema {
    /// どちらの形式も受け付ける
    #[default]
    Auto,
    /// `{"Python": true}`
    BooleanMap,
    /// `{"Python": {"matched": true}}`
    MatchedField,
}

impl ResponseSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSchema::Auto => "auto",
            ResponseSchema::BooleanMap => "boolean-map",
            ResponseSchema::MatchedField => "matched-field",
        }
    }

    fn check_keywords(&self, entries: &[(String, Value)]) -> Result<()> {
        for (keyword, value) in entries {
            let ok = match self {
                ResponseSchema::Auto => true,
                ResponseSchema::BooleanMap => value.is_boolean(),
                ResponseSchema::MatchedField => value
                    .get("matched")
                    .is_some_and(Value::is_boolean),
            };
            if !ok {
                return Err(Error::Decode(format!(
                    "keyword \"{keyword}\" does not follow the {} schema",
                    self.as_str()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResponseSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseSchema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ResponseSchema::Auto),
            "boolean-map" | "boolean" | "v1" => Ok(ResponseSchema::BooleanMap),
            "matched-field" | "matched" | "v2" => Ok(ResponseSchema::MatchedField),
            other => Err(Error::Config(format!(
                "unknown response schema: {other} (expected auto, boolean-map or matched-field)"
            ))),
        }
    }
}

/// `keywords_match` の各エントリ（出現順）
struct KeywordEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for KeywordEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = KeywordEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keyword to match flag")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(KeywordEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct KeywordShape {
    #[serde(default)]
    keywords_match: Option<KeywordEntries>,
}

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            return Ok(response[start..start + end_offset].trim());
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return Ok(&response[start..=end]);
        }
    }

    Err(Error::Decode("no JSON object found in the response".into()))
}

/// 成功レスポンスのボディを解析結果にデコードする
pub fn parse_analysis_response(body: &str, schema: ResponseSchema) -> Result<AnalysisResult> {
    let json_str = extract_json_object(body)?;

    // キーワード順を保つため文字列から直接デコードする
    let result = serde_json::from_str(json_str).map_err(|e| Error::Decode(e.to_string()))?;

    if schema != ResponseSchema::Auto {
        let shape: KeywordShape = serde_json::from_str(json_str)
            .map_err(|e| Error::Decode(format!("invalid JSON: {e}")))?;
        if let Some(KeywordEntries(entries)) = shape.keywords_match {
            schema.check_keywords(&entries)?;
        }
    }

    Ok(result)
}
