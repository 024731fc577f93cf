pub mod actions;
pub mod chat;
pub mod health;
pub mod media;
pub mod session;
