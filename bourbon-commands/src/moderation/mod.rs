pub mod ban;
pub mod kick;
pub mod remove_timeout;
pub mod slash;
pub mod timeout;
pub mod unban;

pub mod action;
pub mod messages;

pub use messages::PRIVATE_MESSAGES_DENIED;
