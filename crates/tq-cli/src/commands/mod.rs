pub mod pick;
pub mod play;
