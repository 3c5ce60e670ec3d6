pub mod entity;
pub mod identity;
pub mod location;
pub mod record;
pub mod util;

pub use entity::*;
pub use identity::*;
pub use location::*;
pub use record::*;
