//! "Docu-Brain": drop documents, upload them, extract their key fields.

pub mod pipeline;
pub mod session;

pub use pipeline::DocumentPipeline;
pub use session::{DocFile, DocState, DocumentSession, TransitionError};
