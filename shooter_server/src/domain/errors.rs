// Domain-level errors for score archive calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    // Transport failure, timeout, or a 5xx from the store.
    Unavailable,
    // The store answered but refused the request.
    Rejected { status: u16 },
    UnknownAccount,
}
