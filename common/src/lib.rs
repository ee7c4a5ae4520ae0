//! Photo Verdict Common Library
//!
//! 判定エンジンの純粋な部分（副作用なし）:
//! 9問の定義、プロンプト生成、レスポンスパーサー、判定結果の型

pub mod error;
pub mod parser;
pub mod prompts;
pub mod questions;
pub mod types;

pub use error::{Error, Result};
pub use parser::{parse_response, parser_for, GroupState, LineEvent, ResponseParser};
pub use prompts::{build_prompt, question_block, PromptPair, NO_MARKER, YES_MARKER};
pub use questions::QuestionGroup;
pub use types::{
    Answer, Answers, MetadataMap, ParsedResponse, PromptVersion, Verdict, METADATA_ERROR_KEY,
};
