//! Command implementations

mod init;
mod list;
mod passwd;
mod serve;

pub use init::init;
pub use list::list;
pub use passwd::passwd;
pub use serve::serve;
