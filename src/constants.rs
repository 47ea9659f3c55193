//! Constants for ARI text encoding.

/// The URI scheme.
pub const SCHEME: &str = "ari";

/// POSIX seconds at the DTN epoch, 2000-01-01T00:00:00Z.
///
/// TP literals count seconds relative to this instant rather than the
/// POSIX epoch.
pub const DTN_EPOCH_POSIX: i64 = 946_684_800;

/// Additional safe characters for ARI text beyond the RFC 3986 unreserved
/// set, from Section 4.1 of draft-ietf-dtn-ari.
pub const ARI_SAFE: &str = "!'+:@";
