//! Errors and error specific types for the gateway client.

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Errors raised while reading a gateway response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// A field the gateway returns on every well-formed reply is missing.
    #[error("Response has no {field_name}")]
    InvalidResponse { field_name: &'static str },

    /// The response body could not be decoded into a payload.
    #[error("Failed to deserialize the gateway response")]
    ResponseDeserializationFailed,
}

/// Errors raised while assembling an outbound gateway request.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A parameter the operation needs was not provided.
    #[error("Missing required parameter: {field_name}")]
    MissingRequiredField { field_name: &'static str },

    /// The request body could not be encoded.
    #[error("Failed to encode the request body")]
    RequestEncodingFailed,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configuration sources could not be read or merged.
    #[error("Failed to build the configuration")]
    ConfigurationBuildFailed,

    /// The merged configuration does not match the settings schema.
    #[error("Failed to deserialize the configuration")]
    DeserializationFailed,
}

/// Parsing error for payload decoding.
#[derive(Debug, thiserror::Error)]
#[error("{{ error_type: ParsingError, error_description: Parsing error }}")]
pub struct ParsingError;
