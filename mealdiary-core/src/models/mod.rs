mod food;
mod meal;
mod meal_item;
mod meal_type;

pub use food::FoodPayload;
pub use meal::Meal;
pub use meal_item::MealItem;
pub use meal_type::MealType;
