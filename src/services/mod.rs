//! Service implementations for Google Drive API.

mod files;

pub use files::FilesService;
