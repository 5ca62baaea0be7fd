//! Request-independent logic: context assembly, admin operations, validation, pagination.

pub mod admin;
pub mod blog;
pub mod pagination;
pub mod university;
mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::AdminService;
pub use blog::BlogService;
pub use pagination::{paginate, Page, PageRequest};
pub use university::UniversityService;
pub use validation::{RequestValidator, ValidationRule};
