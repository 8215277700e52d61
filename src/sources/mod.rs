pub mod mock;
pub mod traits;

pub use mock::MockAdSource;
pub use traits::AdSource;
