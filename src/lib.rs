pub mod config;
pub mod gateway;
pub mod markdown;

pub use markdown::{RenderOptions, Renderer, render};
