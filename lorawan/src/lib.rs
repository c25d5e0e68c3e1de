pub mod device;
pub mod frequency_plans;
pub mod physical_parameters;
pub mod regional_parameters;
pub mod utils;
