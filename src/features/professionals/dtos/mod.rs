mod professional_dto;

pub use professional_dto::{
    BulkAvailabilityDto, CreateProfessionalDto, ProfessionalQueryParams, ProfessionalResponseDto,
    UpdateProfessionalDto,
};
