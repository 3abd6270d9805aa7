pub mod validation;
pub mod test_utils;

pub use validation::FieldError;
