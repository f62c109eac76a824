pub mod mock_behavior;

pub use mock_behavior::*;
