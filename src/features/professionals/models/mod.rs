mod professional;

pub use professional::{
    NewProfessional, Professional, ProfessionalFilter, ProfessionalPatch, ProfessionalSummary,
};
