pub mod profile;
pub mod resume_file;
