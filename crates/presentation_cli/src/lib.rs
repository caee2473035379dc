//! WeatherDash terminal front end
//!
//! A live, in-place redrawn plot of the rolling weather series for one
//! location, refreshed once per poll interval until interrupted.

pub mod cli;
pub mod live;

pub use cli::Cli;
pub use live::{LiveError, LiveFeed, prompt_location};
