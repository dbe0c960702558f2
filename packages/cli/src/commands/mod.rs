pub mod compose;
pub mod export;
pub mod init;
pub mod serve;

pub use compose::{compose, ComposeArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use serve::{serve, ServeArgs};
