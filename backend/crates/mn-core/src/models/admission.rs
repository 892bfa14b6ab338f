/// Result of passing the router gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub service: String,
    pub base_url: String,
    /// Cursor value read for a load-balanced service, `None` for single-instance services
    pub instance: Option<usize>,
}
