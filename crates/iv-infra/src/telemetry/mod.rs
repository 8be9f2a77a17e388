mod http_sender;

pub use http_sender::HttpTelemetrySender;
