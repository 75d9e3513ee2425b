pub mod document;
pub mod header;
pub mod list;
pub mod login;
pub mod views;
