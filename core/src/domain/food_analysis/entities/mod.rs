pub mod analysis_result;
pub mod food_item;
pub mod image_upload;

pub use analysis_result::*;
pub use food_item::*;
pub use image_upload::*;
