use serde::{Deserialize, Serialize};

/// Pagination parameters accepted by listing endpoints.
///
/// Defaults are deliberately conservative so a missing query string can never
/// request an unbounded scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationRequest {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl PaginationRequest {
    /// Clamp to sane bounds before handing to a repository.
    pub fn clamped(&self) -> Self {
        Self {
            limit: self.limit.clamp(1, 200),
            offset: self.offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PaginationRequest;

    #[test]
    fn pagination_defaults_are_safe_and_stable() {
        let p = PaginationRequest::default();
        assert_eq!(p.limit, 50);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn clamping_rejects_degenerate_values() {
        let p = PaginationRequest {
            limit: 0,
            offset: -10,
        }
        .clamped();
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 0);
    }
}
