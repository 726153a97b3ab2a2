pub mod audio;
pub mod brightness;
