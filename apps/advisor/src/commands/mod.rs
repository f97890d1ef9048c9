pub mod draft;
pub mod stub;
pub mod submit;
