pub mod categories;
pub mod dashboard;
pub mod duplicates;
pub mod imports;
pub mod professionals;
