//! Shared data types.

pub mod core;

pub use self::core::{Dimensions, GridMode, NameStyle, Platform, TypeParseError};
