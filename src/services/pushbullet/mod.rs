//! Pushbullet notification sink.

pub mod client;
pub mod messages;

pub use client::PushbulletNotifier;
