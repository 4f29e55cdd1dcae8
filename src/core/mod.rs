// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod config;
pub mod duration;
pub mod error;
pub mod events;
pub mod info;
pub mod manager;
pub mod manager_msg;
pub mod phase;
pub mod scene;
pub mod state;
pub mod utils;

#[cfg(test)]
mod manager_tests;
