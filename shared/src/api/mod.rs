pub mod media;
pub mod response;
