pub mod get_ledger;
pub mod get_meal;
pub mod get_meals;
