pub mod documents;

pub use documents::{Document, DocumentsRepo};
