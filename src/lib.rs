//! Brew Calculator
//!
//! Computes an all-grain beer recipe (grain bill, hop schedule, color and
//! water volumes) from a style, flavor profile, batch size, strength and
//! bitterness target.

pub mod catalog;
pub mod composer;
pub mod db;
pub mod error;
pub mod formulas;
pub mod import;
pub mod matcher;
pub mod models;
pub mod report;
pub mod selector;

pub use catalog::Catalog;
pub use composer::{ComposerSettings, compose_recipe, compose_recipe_with};
pub use error::RecipeError;
pub use models::{FlavorTag, Recipe, RecipeTarget, Style};
