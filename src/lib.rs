#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod codec;
mod common;
mod config;
mod game;
mod match_log;
mod planner;
mod position;
mod replay;
mod ship;
mod targeting;

#[cfg(feature = "std")]
pub mod bot;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod replay_task;
#[cfg(feature = "std")]
pub mod runner;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use board::*;
pub use codec::{decode, decode_grid, encode, encode_grid, EncodedBoard};
pub use common::*;
pub use config::*;
pub use game::*;
pub use match_log::*;
pub use planner::*;
pub use position::{Position, PositionSet};
pub use replay::*;
pub use ship::*;
pub use targeting::*;

#[cfg(feature = "std")]
pub use bot::{serve, RandomBot};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use replay_task::{spawn_replay, ReplayHandle, ReplaySlot};
#[cfg(feature = "std")]
pub use runner::{run_match, MatchRecord};
#[cfg(feature = "std")]
pub use skeleton::*;
#[cfg(feature = "std")]
pub use stub::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, PeerClosed, Transport};
