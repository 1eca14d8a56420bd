pub mod audio;
pub mod catalog;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod popups;
pub mod scheduler;
pub mod storage;
