pub mod dispatch;
pub mod startup;
pub mod types;

pub use dispatch::{Dispatcher, use_dispatcher};
pub use startup::use_startup;
pub use types::*;
