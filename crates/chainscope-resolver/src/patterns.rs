//! Brand and indicator tables
//!
//! The known-chain regexes and franchise vocabularies are configuration data:
//! a [`PatternConfig`] can be loaded from TOML and compiled once into an
//! immutable [`ChainPatterns`] that the resolver shares across threads.

use crate::ResolverError;
use chainscope_domain::Role;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Indicator reported for the "City + Brand" naming heuristic
pub const CITY_PREFIX_INDICATOR: &str = "possible city prefix pattern";

static CITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+\s+[A-Z]").expect("CITY_PREFIX regex is invalid"));

static NUMBERED_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*\d+").expect("NUMBERED_LOCATION regex is invalid"));

static BUILTIN: LazyLock<ChainPatterns> = LazyLock::new(|| {
    ChainPatterns::compile(&PatternConfig::default()).expect("built-in pattern table is invalid")
});

/// Editable pattern tables
///
/// # Examples
///
/// ```
/// use chainscope_resolver::PatternConfig;
///
/// let config = PatternConfig::default();
/// assert!(config.known_chains.iter().any(|p| p.contains("subway")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Regexes for well-known brands, matched case-insensitively against the raw name
    pub known_chains: Vec<String>,

    /// Words and symbols that suggest a franchised or numbered location
    pub franchise_terms: Vec<String>,

    /// Directional words that suggest a regional location
    pub directional_terms: Vec<String>,

    /// Substrings that mark a headquarters record
    pub headquarters_terms: Vec<String>,

    /// Substrings that mark a franchise record
    pub franchise_role_terms: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            known_chains: strings(&[
                // Fast food and coffee
                r"\bmcdonald['’]?s\b",
                r"\bsubway\b",
                r"\bstarbucks\b",
                r"\bburger\s+king\b",
                r"\bwendy['’]?s\b",
                r"\btaco\s+bell\b",
                r"\bkfc\b",
                r"\bkentucky\s+fried\s+chicken\b",
                r"\bpizza\s+hut\b",
                r"\bdomino['’]?s\b",
                r"\bpapa\s+john['’]?s\b",
                r"\bdunkin\b",
                r"\bchipotle\b",
                r"\bchick-fil-a\b",
                r"\bpopeyes\b",
                r"\bpanera\b",
                r"\bdairy\s+queen\b",
                r"\bjimmy\s+john['’]?s\b",
                r"\bfive\s+guys\b",
                r"\barby['’]?s\b",
                r"\bjersey\s+mike['’]?s\b",
                // Personal care
                r"\bgreat\s+clips\b",
                r"\bsupercuts\b",
                r"\bsport\s+clips\b",
                r"\bfantastic\s+sams\b",
                r"\bulta\b",
                r"\bsally\s+beauty\b",
                r"\beuropean\s+wax\s+center\b",
                r"\bmassage\s+envy\b",
                // Fitness
                r"\bplanet\s+fitness\b",
                r"\banytime\s+fitness\b",
                r"\borangetheory\b",
                r"\bgold['’]?s\s+gym\b",
                r"\b24\s+hour\s+fitness\b",
                r"\bla\s+fitness\b",
                r"\bcrunch\s+fitness\b",
                r"\bsnap\s+fitness\b",
                // Convenience and pharmacy
                r"\b7-eleven\b",
                r"\bwalgreens\b",
                r"\bcvs\b",
                r"\brite\s+aid\b",
                // Services
                r"\bh\s*&\s*r\s+block\b",
                r"\bthe\s+ups\s+store\b",
                r"\bjiffy\s+lube\b",
                r"\bmidas\b",
                r"\bre/?max\b",
                r"\bkeller\s+williams\b",
                r"\bcentury\s+21\b",
                r"\bcoldwell\s+banker\b",
                r"\bkumon\b",
                r"\bmathnasium\b",
            ]),
            franchise_terms: strings(&[
                "franchise",
                "franchisee",
                "licensed",
                "#",
                "no.",
                "store",
                "location",
                "branch",
                "unit",
                "of",
                "at",
                "-",
            ]),
            directional_terms: strings(&[
                "north", "south", "east", "west", "central", "downtown", "midtown",
            ]),
            headquarters_terms: strings(&["headquarter", "corporate", "main office", "hq"]),
            franchise_role_terms: strings(&["franchise", "licensed"]),
        }
    }
}

impl PatternConfig {
    /// Load pattern tables from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ResolverError> {
        toml::from_str(toml_str)
            .map_err(|e| ResolverError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize pattern tables to TOML string
    pub fn to_toml(&self) -> Result<String, ResolverError> {
        toml::to_string_pretty(self)
            .map_err(|e| ResolverError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

/// A vocabulary term and its compiled matcher
#[derive(Debug, Clone)]
struct Term {
    text: String,
    regex: Regex,
}

impl Term {
    /// Alphanumeric edges match on word boundaries; symbol edges match anywhere
    fn compile(text: &str) -> Result<Self, ResolverError> {
        let starts_word = text.chars().next().is_some_and(char::is_alphanumeric);
        let ends_word = text.chars().last().is_some_and(char::is_alphanumeric);
        let pattern = format!(
            "{}{}{}",
            if starts_word { r"\b" } else { "" },
            regex::escape(text),
            if ends_word { r"\b" } else { "" },
        );
        let regex = compile_insensitive(&pattern)?;
        Ok(Self {
            text: text.to_string(),
            regex,
        })
    }
}

fn compile_insensitive(pattern: &str) -> Result<Regex, ResolverError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ResolverError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compiled, immutable pattern tables
#[derive(Debug, Clone)]
pub struct ChainPatterns {
    known_chains: Vec<Regex>,
    indicators: Vec<Term>,
    headquarters_terms: Vec<String>,
    franchise_role_terms: Vec<String>,
}

impl ChainPatterns {
    /// Compile pattern tables
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Pattern`] naming the first pattern that fails to compile.
    pub fn compile(config: &PatternConfig) -> Result<Self, ResolverError> {
        let known_chains = config
            .known_chains
            .iter()
            .map(|p| compile_insensitive(p))
            .collect::<Result<Vec<_>, _>>()?;

        let indicators = config
            .franchise_terms
            .iter()
            .chain(config.directional_terms.iter())
            .filter(|t| !t.trim().is_empty())
            .map(|t| Term::compile(t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            known_chains,
            indicators,
            headquarters_terms: config.headquarters_terms.iter().map(|t| t.to_lowercase()).collect(),
            franchise_role_terms: config.franchise_role_terms.iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    /// The built-in tables, compiled once per process
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Number of known-chain patterns
    pub fn known_chain_count(&self) -> usize {
        self.known_chains.len()
    }

    /// Brand text matched in the raw name, if any
    ///
    /// Patterns are tried in table order; the first hit wins.
    pub fn known_chain<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.known_chains
            .iter()
            .find_map(|re| re.find(name))
            .map(|m| m.as_str())
    }

    /// Franchise indicators present in the name, de-duplicated, in table order
    ///
    /// Also reports [`CITY_PREFIX_INDICATOR`] when the name opens with two
    /// capitalized words ("Miami Subway").
    pub fn franchise_indicators(&self, name: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();

        for term in &self.indicators {
            if term.regex.is_match(name) && !found.iter().any(|f| f == &term.text) {
                found.push(term.text.clone());
            }
        }

        if CITY_PREFIX.is_match(name) {
            found.push(CITY_PREFIX_INDICATOR.to_string());
        }

        found
    }

    /// Role of a record already known to belong to a chain
    ///
    /// Headquarters keywords win over franchise keywords; anything else is a branch.
    pub fn chain_role(&self, name: &str) -> Role {
        let lower = name.to_lowercase();

        if self.headquarters_terms.iter().any(|t| lower.contains(t.as_str())) {
            return Role::Headquarters;
        }

        if self.franchise_role_terms.iter().any(|t| lower.contains(t.as_str()))
            || NUMBERED_LOCATION.is_match(&lower)
        {
            return Role::Franchise;
        }

        Role::Branch
    }
}

impl Default for ChainPatterns {
    fn default() -> Self {
        Self::builtin()
    }
}
