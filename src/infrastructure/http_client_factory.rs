use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used for prediction calls.
    ///
    /// No retry middleware: a failed prediction is reported to the user as is.
    /// Without `request_timeout` only the connect phase is bounded.
    pub fn create_client(request_timeout: Option<Duration>, connect_timeout: Duration) -> Client {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(2)
            .connect_timeout(connect_timeout);

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_else(|_| Client::new())
    }
}
