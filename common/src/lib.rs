//! Resume Score Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod document;
pub mod endpoint;
pub mod failure;
pub mod lifecycle;
pub mod parser;
pub mod render;
pub mod submission;

pub use types::{AnalysisResult, KeywordMatch, Score};
pub use error::{Error, Result, ValidationError};
pub use document::{DocumentKind, SelectedFile, accept_attribute};
pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use failure::{detail_from_body, error_message, status_message, FALLBACK_ERROR_MESSAGE};
pub use lifecycle::{Lifecycle, RequestState, Ticket};
pub use parser::{extract_json_object, parse_analysis_response, ResponseSchema};
pub use render::{ResultView, ScoreThresholds, ScoreTier, Tag, TagTone};
pub use submission::{JobInput, Submission, FIELD_FILE, FIELD_JOB_DESCRIPTION, FIELD_JOB_TITLE};
