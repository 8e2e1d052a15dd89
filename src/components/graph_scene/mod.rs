mod camera;
mod component;
mod info;
mod render;
mod selection;
mod state;
mod stats;

pub use component::GraphScene;
