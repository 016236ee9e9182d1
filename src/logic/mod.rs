pub mod calculations;
pub mod controller;
pub mod rules;

pub use controller::Controller;
pub use rules::PolicyEngine;
