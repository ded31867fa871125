// MindCare companion: the reply pipeline and its HTTP surface.
//
// Request flow: context -> llm_client -> parser -> (fallback: language + mood
// -> templates) -> normalizer, driven by the coordinator.

pub mod config;
pub mod context;
pub mod coordinator;
pub mod http_server;
pub mod language;
pub mod llm_client;
pub mod mood;
pub mod normalizer;
pub mod parser;
pub mod templates;
pub mod types;
