// Copyright @yucwang 2021

pub extern crate nalgebra as na;

pub mod core;
pub mod math;
pub mod media;
pub mod optics;
pub mod sensors;
pub mod shapes;
pub mod tracers;
