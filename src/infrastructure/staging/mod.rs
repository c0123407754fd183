//! Temporary staging of uploaded documents

mod temp_file;

pub use temp_file::StagedDocument;
