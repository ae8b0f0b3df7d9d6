pub mod day_record;
pub mod meal_record;
pub mod sleep_record;
pub mod step;
pub mod step_state;
pub mod workout;
