/// The kind of transport error that occurred.
///
/// A transport error means the round trip itself failed. Errors reported
/// by the service in a well-formed payload are not transport errors, see
/// [`ChatResponse::Error`](crate::ChatResponse::Error).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service could not be reached at all.
    Unreachable,
    /// The service answered with a non-successful status.
    BadStatus,
    /// The payload could not be decoded into the expected schema.
    MalformedPayload,
}
