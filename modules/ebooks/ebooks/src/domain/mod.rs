pub mod error;
pub mod local_client;
pub mod policy;
pub mod repos;
pub mod service;
