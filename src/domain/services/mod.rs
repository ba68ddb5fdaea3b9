pub mod pricing;
pub mod promotion;
pub mod reservation;
pub mod sample_data;
