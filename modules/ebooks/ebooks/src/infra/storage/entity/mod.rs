pub mod ebook;
pub mod review;
