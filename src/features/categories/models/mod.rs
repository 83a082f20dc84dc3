mod category;

pub use category::{Category, CategoryFilter, CategoryPatch, CategoryRef, CategoryStatus, NewCategory};
