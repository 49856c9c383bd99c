mod redirect;

pub use redirect::*;
