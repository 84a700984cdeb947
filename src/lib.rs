//! Network media-control endpoint: playback intent over HTTP and whole-file
//! track delivery for constrained clients.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod media;
pub mod playback;
pub mod streamer;
