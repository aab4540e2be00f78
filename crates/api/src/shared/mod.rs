pub mod live;
pub mod usecase;
