pub mod alert;
pub mod camera;
pub mod recording;
pub mod stream;
