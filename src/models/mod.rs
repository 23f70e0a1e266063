pub mod address;
pub mod product;
pub mod review;
