//! Multi-language philosophical journal.
//!
//! A question is translated into every enabled language, answered there by a
//! counselor persona, translated back to English, and the answers are compared
//! in a closing synthesis. The run is written out as a Markdown journal.

pub mod config;
pub mod invoker;
pub mod journal;
pub mod mock;
pub mod openai;
pub mod pipeline;
pub mod prompts;
