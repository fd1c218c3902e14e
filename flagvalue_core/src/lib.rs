//! Core module for `flagvalue`.
//! See [documentation root](https://docs.rs/flagvalue/latest/flagvalue/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod dispatch;
mod mask;
mod model;
pub mod prelude;
mod text;

pub use api::*;
pub use constant::COUNTER_INCREMENT;
pub use dispatch::{Codec, Dispatch, Flaggable, Forward};
pub use mask::IpMask;
pub use model::*;
pub use text::TextSeed;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
