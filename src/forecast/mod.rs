pub mod aligner;
pub mod error;
pub mod horizon;
pub mod summary;
pub mod table;
