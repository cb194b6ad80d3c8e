//! The fixed set of proxied upstream endpoints.
//!
//! # Responsibilities
//! - Map inbound `/api/test/{suffix}` segments to upstream suffixes
//! - Declare each endpoint's query-forwarding policy
//!
//! # Design Decisions
//! - Closed enum rather than string pass-through, so a typo'd path can
//!   never produce an upstream call
//! - Query policy lives with the endpoint, not in the handler

/// One of the enumerated upstream paths the gateway forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Ping,
    Filters,
    PriceRange,
    OptionSpaceType,
    OptionSpaceUse,
    SearchUrl,
    SearchResults,
}

/// How inbound query parameters are forwarded for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPolicy {
    /// Inbound parameters are dropped; the upstream call carries none.
    None,
    /// Every inbound parameter is forwarded unmodified.
    PassThrough,
    /// Exactly one named parameter is required and forwarded.
    Required(&'static str),
}

impl Endpoint {
    /// All endpoints, in upstream declaration order.
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Ping,
        Endpoint::Filters,
        Endpoint::PriceRange,
        Endpoint::OptionSpaceType,
        Endpoint::OptionSpaceUse,
        Endpoint::SearchUrl,
        Endpoint::SearchResults,
    ];

    /// Resolve an inbound path segment to an endpoint.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.suffix() == suffix)
    }

    /// The path suffix appended to the upstream base URL.
    pub fn suffix(self) -> &'static str {
        match self {
            Endpoint::Ping => "ping",
            Endpoint::Filters => "filters",
            Endpoint::PriceRange => "price_range",
            Endpoint::OptionSpaceType => "option_space_type",
            Endpoint::OptionSpaceUse => "option_space_use",
            Endpoint::SearchUrl => "search_url",
            Endpoint::SearchResults => "search_results",
        }
    }

    /// Query-forwarding policy for this endpoint.
    pub fn query_policy(self) -> QueryPolicy {
        match self {
            Endpoint::SearchUrl => QueryPolicy::PassThrough,
            Endpoint::SearchResults => QueryPolicy::Required("url"),
            _ => QueryPolicy::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_round_trips() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_suffix(endpoint.suffix()), Some(endpoint));
        }
    }

    #[test]
    fn unknown_suffix_is_rejected() {
        assert_eq!(Endpoint::from_suffix("products"), None);
        assert_eq!(Endpoint::from_suffix(""), None);
        assert_eq!(Endpoint::from_suffix("PING"), None);
    }

    #[test]
    fn query_policies() {
        assert_eq!(Endpoint::Ping.query_policy(), QueryPolicy::None);
        assert_eq!(Endpoint::SearchUrl.query_policy(), QueryPolicy::PassThrough);
        assert_eq!(
            Endpoint::SearchResults.query_policy(),
            QueryPolicy::Required("url")
        );
    }
}
