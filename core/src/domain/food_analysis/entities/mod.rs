pub mod food_analysis;
pub mod gi_rating;
pub mod meal_food;

pub use food_analysis::*;
pub use gi_rating::*;
pub use meal_food::*;
