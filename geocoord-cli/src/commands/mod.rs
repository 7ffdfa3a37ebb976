pub mod batch;
pub mod convert;
pub mod detect;
pub mod distance;
