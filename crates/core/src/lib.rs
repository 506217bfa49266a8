pub mod markets;
pub mod models;
pub mod traits;

pub use markets::*;
pub use models::*;
pub use traits::*;
