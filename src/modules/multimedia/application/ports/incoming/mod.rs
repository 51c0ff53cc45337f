pub mod services;
pub mod use_cases;
