pub mod bar;
pub mod indicator;
pub mod interval;
pub mod request_params;
pub mod series;
