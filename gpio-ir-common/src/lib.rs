#![no_std]

pub mod limits;
pub mod math;
pub mod params;
