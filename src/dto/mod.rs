pub mod page;
pub mod vehicle_dto;

pub use page::Page;
