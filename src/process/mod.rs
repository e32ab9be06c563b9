pub mod normalize;
pub mod utils;
pub mod window;
