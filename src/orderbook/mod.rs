//! 로컬 호가 사본

pub mod local_book;

pub use local_book::LocalBook;
