//! Wistia Data API クライアント
//!
//! - `client`: HTTPリクエストの組み立てとレスポンスのデコード
//! - `auth`: Bearer トークン
//! - `types`: メディア・アセット・字幕のレスポンス型
//! - `error`: 単一のエラー型 `RequestError`

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiResult, DOWNLOAD_CHUNK_SIZE, ProgressCallback, WistiaClient};
pub use error::RequestError;
pub use types::{Asset, Caption, Media};
