pub mod access;
pub mod error;
pub mod fragments;
pub mod result;
pub mod store;
pub mod template;

pub use access::*;
pub use error::*;
pub use fragments::*;
pub use result::*;
pub use store::*;
pub use template::*;
