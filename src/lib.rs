#![forbid(unsafe_code)]

pub mod blur;
pub mod color;
pub mod command;
pub mod composite;
pub mod container;
pub mod error;
pub mod geometry;
pub mod model;
pub mod patterns;
pub mod raster;
pub mod render;

pub use color::Rgba8;
pub use command::{DrawCommand, Stroke};
pub use error::{GeoloomError, GeoloomResult};
pub use model::{
    ContainerConfig, ContainerShape, DEFAULT_SUPERSAMPLE, MAX_ITERATIONS, MAX_LAYERS, MAX_RINGS,
    MAX_WORKING_DIM, Pattern, RenderRequest,
};
pub use render::{RenderedImage, render};
