// Feature order and sampling ranges
pub mod features;

// Request/response payloads of the prediction service
pub mod prediction;

// Port interfaces (service + UI binding)
pub mod ports;

// Domain-specific error types
pub mod errors;
