// Copyright @yucwang 2021

pub mod error;
pub mod interaction;
pub mod laser;
pub mod light_ray;
pub mod medium;
pub mod reading;
pub mod scene;
pub mod scene_loader;
pub mod sensor;
pub mod shape;
pub mod tracer;
