pub mod auth;
pub mod storage;
