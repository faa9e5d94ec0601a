use crate::error::{Result, ScoreError};
use resume_score_common::{Endpoint, ResponseSchema, ScoreThresholds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "RESUME_SCORE_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: Option<Endpoint>,
    pub schema: ResponseSchema,
    pub high_threshold: u8,
    pub mid_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            schema: ResponseSchema::Auto,
            high_threshold: ScoreThresholds::DEFAULT.high(),
            mid_threshold: ScoreThresholds::DEFAULT.mid(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 既存の内容は読まずに既定値で上書きする（壊れたファイルからの復旧用）
    pub fn reset() -> Result<Self> {
        Self::reset_at(&Self::config_path()?)
    }

    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScoreError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("resume-score").join("config.json"))
    }

    /// 優先順位: 引数 > 環境変数 > 設定ファイル > 既定値
    pub fn resolve_endpoint(&self, flag: Option<Endpoint>) -> Result<Endpoint> {
        resolve_endpoint_with(flag, || Ok(self.endpoint.clone()))
    }

    pub fn thresholds(&self) -> Result<ScoreThresholds> {
        Ok(ScoreThresholds::new(self.high_threshold, self.mid_threshold)?)
    }

    pub fn set_endpoint(&mut self, endpoint: Endpoint) -> Result<()> {
        self.endpoint = Some(endpoint);
        self.save()
    }

    pub fn set_schema(&mut self, schema: ResponseSchema) -> Result<()> {
        self.schema = schema;
        self.save()
    }
}

/// 設定ファイルの値は最後に参照する
fn resolve_endpoint_with(
    flag: Option<Endpoint>,
    from_file: impl FnOnce() -> Result<Option<Endpoint>>,
) -> Result<Endpoint> {
    if let Some(endpoint) = flag {
        return Ok(endpoint);
    }

    if let Ok(value) = std::env::var(ENDPOINT_ENV) {
        if !value.trim().is_empty() {
            return Ok(Endpoint::parse(&value)?);
        }
    }

    Ok(from_file()?.unwrap_or_default())
}

/// 読み込み済みの設定
///
/// 設定ファイルが壊れていても、その値が必要になるまではエラーにしない。
/// 引数や環境変数で足りる場合はそのまま動く。
#[derive(Debug)]
pub struct LoadedConfig {
    path: PathBuf,
    config: std::result::Result<Config, String>,
}

impl LoadedConfig {
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Config::config_path()?))
    }

    pub fn load_from(path: &Path) -> Self {
        let config = Config::load_from(path).map_err(|e| e.to_string());
        if let Err(e) = &config {
            tracing::warn!(path = %path.display(), error = %e, "config file could not be loaded");
        }
        Self {
            path: path.to_path_buf(),
            config,
        }
    }

    /// 設定ファイルの値が必要なときに呼ぶ
    pub fn require(&self) -> Result<&Config> {
        self.config.as_ref().map_err(|e| {
            ScoreError::Config(format!(
                "{} の読み込みに失敗: {e}（`resume-score config --reset` で初期化できます）",
                self.path.display()
            ))
        })
    }

    pub fn resolve_endpoint(&self, flag: Option<Endpoint>) -> Result<Endpoint> {
        resolve_endpoint_with(flag, || Ok(self.require()?.endpoint.clone()))
    }

    pub fn schema(&self, flag: Option<ResponseSchema>) -> Result<ResponseSchema> {
        match flag {
            Some(schema) => Ok(schema),
            None => Ok(self.require()?.schema),
        }
    }

    /// 色分けだけに使うので、読めない設定ファイルなら既定値
    pub fn thresholds(&self) -> Result<ScoreThresholds> {
        match &self.config {
            Ok(config) => config.thresholds(),
            Err(_) => Ok(ScoreThresholds::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.schema, ResponseSchema::Auto);
        assert_eq!(config.thresholds().unwrap(), ScoreThresholds::DEFAULT);
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            endpoint: Some(Endpoint::parse("https://config.example.com/analyze").unwrap()),
            ..Default::default()
        };
        let flag = Endpoint::parse("http://localhost:8000/analyze-resume/").unwrap();
        assert_eq!(config.resolve_endpoint(Some(flag.clone())).unwrap(), flag);
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = Config {
            high_threshold: 40,
            mid_threshold: 60,
            ..Default::default()
        };
        assert!(config.thresholds().is_err());
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"schema": "matched-field"}"#).unwrap();
        assert_eq!(config.schema, ResponseSchema::MatchedField);
        assert_eq!(config.high_threshold, 85);
        assert!(config.endpoint.is_none());
    }
}
