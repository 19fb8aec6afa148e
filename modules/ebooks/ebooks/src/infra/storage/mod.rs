pub mod db;
pub mod entity;
pub mod migrations;

mod ebooks_sea_repo;
mod reviews_sea_repo;

pub use ebooks_sea_repo::OrmEbooksRepository;
pub use reviews_sea_repo::OrmReviewsRepository;
