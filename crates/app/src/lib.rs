#![warn(clippy::pedantic)]

pub mod log;
