//! Browser storage media.

pub mod estimate;
pub mod indexed_db;
pub mod local_storage;
