#![forbid(unsafe_code)]
#![warn(
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod configs;
pub mod consts;
pub mod custom_serde;
pub mod errors;
pub mod ext_traits;
pub mod gateway;
pub mod logger;
pub mod payload;
pub mod response;
pub mod transformers;
pub mod types;

pub use gateway::{ApplePayGateway, GatewayRequest, Operation, PaymentParameters};
pub use response::Response;
pub use transformers::{EntityBuilder, ObjectMapper};
