pub mod common;
pub mod events;
pub mod intent;
pub mod metadata;
pub mod receipt;
pub mod result;
pub mod transaction;

pub use common::*;
pub use events::*;
pub use intent::*;
pub use metadata::*;
pub use receipt::*;
pub use result::*;
pub use transaction::*;
