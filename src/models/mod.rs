//! Data models module
//!
//! Plain entity records with identity and relational foreign keys. All
//! behavior lives in the application layer.

pub mod appointment;
pub mod bot;
pub mod branch;
pub mod city;
pub mod client;
pub mod manager;
pub mod master;
pub mod service;
pub mod timezone;

// Re-export commonly used models
pub use appointment::Appointment;
pub use bot::{Bot, NewBot};
pub use branch::{AvailableBranch, Branch, NewBranch};
pub use city::{City, NewCity};
pub use client::{Client, NewClient};
pub use manager::Manager;
pub use master::{Master, NewMaster};
pub use service::{AvailableService, NewService, Service};
pub use timezone::TimeZone;
