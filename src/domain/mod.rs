// Domain layer: request/response models, plain-data HTTP types and ports.

pub mod http;
pub mod model;
pub mod ports;
