//! Wistia Data API のクライアントと、それを使うCLI。
//!
//! ライブラリとしては [`api::WistiaClient`] が中心です。
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use wistia_cli::api::WistiaClient;
//!
//! # async fn example() -> Result<(), wistia_cli::api::RequestError> {
//! let client = WistiaClient::new("api-token")?;
//! let medias: Vec<_> = client.list_all_media("project-hashed-id", 100).try_collect().await?;
//! client.delete_caption(&medias[0].hashed_id, "fr").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error_severity;
pub mod logging;
pub mod presentation;
