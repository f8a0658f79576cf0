pub mod client;
pub mod request_builder;
pub mod response_converter;

pub use client::HttpClassificationClient;
pub use request_builder::RequestBuilderImpl;
pub use response_converter::{classify_transport_error, ResponseConverterImpl};
