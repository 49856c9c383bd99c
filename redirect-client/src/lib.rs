mod client;
mod date;
pub mod domain;
mod error;
mod form;
mod token;

pub use client::*;
pub use date::*;
pub use error::*;
pub use form::*;
pub use token::*;
