pub mod evidence;
pub mod model;
pub mod notice;
pub mod render;
pub mod section;
pub mod submit;
pub mod validate;
pub mod wizard;
