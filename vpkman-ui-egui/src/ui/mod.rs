pub mod about;
pub mod logs;
pub mod mods;
pub mod setup;
