/// Experimental same-host restriction for local candidates.
///
/// Keeps only candidates whose text names the signaling host. Candidates
/// carry addresses, not names, so a hostname here drops everything; use it
/// with an IP-addressed signaling server only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    host: String,
}

impl CandidateFilter {
    pub fn same_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn admits(&self, candidate: &str) -> bool {
        candidate.contains(&self.host)
    }
}
