/// The two flavors of issued credentials. Each kind is signed with its own
/// secret so one can never stand in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived token attached to every protected request.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}
