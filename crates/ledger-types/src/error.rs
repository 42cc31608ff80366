use strum::Display;

/// Failure categories surfaced to the operator. Every kind is recovered
/// where it occurs and shown as a transient status; none is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The request could not be sent or completed.
    NetworkFailure,
    /// The service answered with a non-success status or an unreadable body.
    ServerError,
    /// An export was attempted on an empty filtered set.
    ExportPrecondition,
    /// The spreadsheet codec could not be initialized.
    CodecLoadFailure,
    /// The codec loaded but encoding or writing the artifact failed.
    ExportFailure,
}
