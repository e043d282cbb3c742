pub mod attendance;
pub mod events;
