mod category_dto;

pub use category_dto::{
    BulkCategoryStatusDto, CategoryQueryParams, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
