pub mod doctor;
pub mod seed;

pub use doctor::DoctorService;
pub use seed::seed_catalog;
