pub mod http_client_factory;
pub mod http_prediction_service;
pub mod mock;

pub use http_prediction_service::HttpPredictionService;
pub use mock::MockPredictionService;
