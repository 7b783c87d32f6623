//! Low-level scanning primitives shared by the reader and the writer

pub mod cursor;
pub mod name;

pub use cursor::Cursor;
