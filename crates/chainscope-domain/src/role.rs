//! Role module - how a record relates to its chain

use std::fmt;

/// Role of a record within a chain
///
/// - Headquarters: the corporate or main office
/// - Branch: a company-operated location
/// - Franchise: an independently licensed location
/// - Independent: not part of any chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Corporate or main office
    Headquarters,

    /// Company-operated location
    Branch,

    /// Franchised or licensed location
    Franchise,

    /// Stand-alone business
    Independent,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Headquarters => "headquarters",
            Role::Branch => "branch",
            Role::Franchise => "franchise",
            Role::Independent => "independent",
        }
    }

    /// Parse a role from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "headquarters" | "hq" => Some(Role::Headquarters),
            "branch" => Some(Role::Branch),
            "franchise" => Some(Role::Franchise),
            "independent" => Some(Role::Independent),
            _ => None,
        }
    }

    /// True for every role except `Independent`
    pub fn is_chain_member(&self) -> bool {
        !matches!(self, Role::Independent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Headquarters, Role::Branch, Role::Franchise, Role::Independent] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!("Franchise".parse::<Role>(), Ok(Role::Franchise));
        assert_eq!(Role::parse("HQ"), Some(Role::Headquarters));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_chain_membership() {
        assert!(Role::Branch.is_chain_member());
        assert!(!Role::Independent.is_chain_member());
    }
}
