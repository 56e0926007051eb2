pub mod intensity_meter;
