pub mod decision;
pub mod reading;
pub mod record;
pub mod scenario;

pub use decision::*;
pub use reading::*;
pub use record::*;
pub use scenario::*;
