//! Drawing side of the CAD command system.
//!
//! Takes [`cadcommand_nlp`] parse results and turns them into entities:
//! - `dispatch`: parsed command to tool call
//! - `service`: argument validation, lazy backend start, drawing state
//! - `backend`: the model-space abstraction and its implementations
//! - `tools`: schema-validated tool registry
//! - `server`: HTTP surface over the tools and the parser

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod server;
pub mod service;
pub mod tools;

pub use backend::{default_backend, DrawingBackend, MemoryBackend, SharedBackend};
pub use config::{load_config, Config};
pub use dispatch::{tool_call_for, ToolCall};
pub use error::{CoreError, CoreResult};
pub use service::CadService;
