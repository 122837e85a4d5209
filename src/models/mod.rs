pub mod scenario;
pub mod session;

pub use scenario::*;
pub use session::*;
