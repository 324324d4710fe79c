pub mod nutrient;
pub mod product;
pub mod score;

pub use nutrient::*;
pub use product::*;
pub use score::*;
