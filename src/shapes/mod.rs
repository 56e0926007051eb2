// Copyright @yucwang 2023

pub mod circle;
pub mod polygon;
pub mod prisms;
pub mod semicircle;
