//! tupa - answers citizen questions about municipal TUPA procedures.
//!
//! A directory of semi-structured plain-text procedure documents is parsed
//! into an in-memory [`ProcedureCatalog`]. Each chat message is routed by
//! keyword scoring plus topic-specific override rules to either a formatted
//! procedure, a short list of suggested titles, a redirect to the competent
//! institution, or an out-of-domain notice.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tupa::{Assistant, ChatRequest, DataDir, ProcedureCatalog, Reply};
//!
//! let data_dir = DataDir::resolve(None).unwrap();
//! let catalog = ProcedureCatalog::load_dir(data_dir.root());
//! let assistant = Assistant::new(Arc::new(catalog));
//!
//! match assistant.chat(&ChatRequest::new("licencia de funcionamiento")).unwrap() {
//!     Reply::Text { response } => println!("{response}"),
//!     Reply::Suggestions { message, suggestions } => {
//!         println!("{message}");
//!         for title in suggestions {
//!             println!("- {title}");
//!         }
//!     }
//! }
//! ```

pub mod assistant;
pub mod catalog;
pub mod conversation;
pub mod data_dir;
pub mod error;
pub mod format;
pub mod mcp;
pub mod normalize;
pub mod parser;
pub mod record;
pub mod router;
pub mod rules;
pub mod scorer;
pub mod walker;

pub use assistant::{Assistant, ChatRequest, TitlesResponse};
pub use catalog::{ProcedureCatalog, ProcedureId};
pub use data_dir::DataDir;
pub use error::{Error, Result};
pub use record::ProcedureRecord;
pub use router::Reply;
