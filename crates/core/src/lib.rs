pub mod alert;
pub mod call;
pub mod coaching;
pub mod config;
pub mod error;
pub mod evaluation;

pub use alert::*;
pub use call::*;
pub use coaching::*;
pub use config::Config;
pub use error::*;
pub use evaluation::*;
