//! Command implementations for OxiHuff CLI.

pub mod codes;
pub mod decode;
pub mod encode;
pub mod info;

pub use codes::cmd_codes;
pub use decode::cmd_decode;
pub use encode::cmd_encode;
pub use info::cmd_info;
