mod link;
pub use link::*;

mod session;
pub use session::*;
