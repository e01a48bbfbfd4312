pub mod compass;
pub mod hardware;
