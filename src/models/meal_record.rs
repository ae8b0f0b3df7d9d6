use crate::errors::{AppError, AppResult};
use crate::sheet::layout::{Layout, MEALS, RowData, SheetRecord};
use crate::utils::date::{fmt_date, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Free-text meal notes for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
}

impl Meals {
    pub fn is_empty(&self) -> bool {
        self.breakfast.is_empty() && self.lunch.is_empty() && self.dinner.is_empty()
    }
}

/// One row of the meals tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub date: NaiveDate,
    pub meals: Meals,
    pub supplements: String,
}

impl MealRecord {
    pub fn from_row(row: &RowData) -> AppResult<Self> {
        let raw = row.get("DATE")?;
        let date = parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.into()))?;
        Ok(Self {
            date,
            meals: Meals {
                breakfast: row.get_or_empty("BREAKFAST").to_string(),
                lunch: row.get_or_empty("LUNCH").to_string(),
                dinner: row.get_or_empty("DINNER").to_string(),
            },
            supplements: row.get_or_empty("SUPPLEMENTS").to_string(),
        })
    }
}

impl SheetRecord for MealRecord {
    const LAYOUT: &'static Layout = &MEALS;

    fn key(&self) -> String {
        fmt_date(self.date)
    }

    fn fields(&self) -> AppResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("DATE", fmt_date(self.date)),
            ("BREAKFAST", self.meals.breakfast.clone()),
            ("LUNCH", self.meals.lunch.clone()),
            ("DINNER", self.meals.dinner.clone()),
            ("SUPPLEMENTS", self.supplements.clone()),
        ])
    }
}
