//! # Weekly Meal Plan
//!
//! A week of planned recipes: seven days, each with four meal slots holding
//! zero or more recipes. Slots missing from a stored plan read as empty.

use crate::ingredient_model::Recipe;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Day of the planning week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// The plan day a calendar date falls on
    pub fn for_date(date: NaiveDate) -> Self {
        Day::from(date.weekday())
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Recipes planned per day and meal type.
///
/// Serialized as `{ "Monday": { "Breakfast": [recipe, ...], ... }, ... }`.
/// A `null` plan, day or slot reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MealPlan {
    slots: BTreeMap<Day, BTreeMap<MealType, Vec<Recipe>>>,
}

type StoredPlan = BTreeMap<Day, Option<BTreeMap<MealType, Option<Vec<Recipe>>>>>;

impl<'de> Deserialize<'de> for MealPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = Option::<StoredPlan>::deserialize(deserializer)?.unwrap_or_default();
        let slots = stored
            .into_iter()
            .map(|(day, meals)| {
                let meals = meals
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(meal, recipes)| (meal, recipes.unwrap_or_default()))
                    .collect();
                (day, meals)
            })
            .collect();
        Ok(Self { slots })
    }
}

impl Default for MealPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl MealPlan {
    /// A plan with every day and meal slot present and empty
    pub fn new() -> Self {
        let mut plan = Self {
            slots: BTreeMap::new(),
        };
        plan.fill_missing_slots();
        plan
    }

    /// Insert any absent day or meal slot as an empty list
    pub fn fill_missing_slots(&mut self) {
        for day in Day::ALL {
            let meals = self.slots.entry(day).or_default();
            for meal in MealType::ALL {
                meals.entry(meal).or_default();
            }
        }
    }

    /// Recipes in one slot; an absent slot is empty
    pub fn slot(&self, day: Day, meal: MealType) -> &[Recipe] {
        self.slots
            .get(&day)
            .and_then(|meals| meals.get(&meal))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Add a recipe to a slot
    pub fn add_recipe(&mut self, day: Day, meal: MealType, recipe: Recipe) {
        self.slots
            .entry(day)
            .or_default()
            .entry(meal)
            .or_default()
            .push(recipe);
    }

    /// Remove the recipe at `index` from a slot, returning it if present
    pub fn remove_recipe(&mut self, day: Day, meal: MealType, index: usize) -> Option<Recipe> {
        let recipes = self.slots.get_mut(&day)?.get_mut(&meal)?;
        if index < recipes.len() {
            Some(recipes.remove(index))
        } else {
            None
        }
    }

    /// Every (day, meal, recipe) in week order
    pub fn iter(&self) -> impl Iterator<Item = (Day, MealType, &Recipe)> {
        Day::ALL.into_iter().flat_map(move |day| {
            MealType::ALL.into_iter().flat_map(move |meal| {
                self.slot(day, meal)
                    .iter()
                    .map(move |recipe| (day, meal, recipe))
            })
        })
    }

    /// Number of planned recipes across the week
    pub fn recipe_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_count() == 0
    }
}
