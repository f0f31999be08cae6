// handlers/mod.rs - one file per endpoint
pub mod diagnostics;
pub mod init_sheet;
pub mod submit;
