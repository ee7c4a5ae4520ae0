//! photo-verdict
//!
//! 写真のEXIFメタデータをもとにAIへ9問の真正性判定を依頼し、
//! レスポンスを正規化してレコードストアに記録する。

pub mod ai_provider;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod verdict;
