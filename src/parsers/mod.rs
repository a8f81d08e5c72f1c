pub mod hour;
pub mod price;

pub use hour::*;
pub use price::*;
