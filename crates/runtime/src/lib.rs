//! Question pipeline: LLM-driven tool selection, protocol-mediated
//! invocation, and answer synthesis.
//!
//! A question flows through three strict one-directional handoffs:
//!
//! 1. [`selector::select_tool`] asks the model to emit a
//!    `{toolName, parameters}` object, parses it strictly, and validates
//!    the parameters against the weather schema.
//! 2. [`Session::ask`] forwards the validated invocation to the spawned
//!    tool server over the wire protocol.
//! 3. [`synthesizer::synthesize`] asks the model to render the structured
//!    result as a short Turkish answer.
//!
//! Every stage fails fast with a typed error; nothing is retried or
//! repaired. The interactive driver is the only place failures are caught.
//!
//! # Example
//!
//! ```no_run
//! use mcp::ServerConfig;
//! use runtime::{llm, Session};
//!
//! # async fn example() -> runtime::Result<()> {
//! let llm = llm::Client::new("sk-or-...");
//! let session = Session::connect(llm, ServerConfig::new("poyraz-server")).await?;
//!
//! let answer = session.ask("İstanbul'da 2025-08-29 tarihinde hava nasıl olacak?").await?;
//! println!("{answer}");
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod llm;
pub mod schema;
pub mod selector;
mod session;
pub mod synthesizer;

pub use error::{Error, Result};
pub use selector::ToolInvocation;
pub use session::Session;
