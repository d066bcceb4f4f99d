// Category Pattern Table
// Static phrase patterns per (category, tier), compiled once per process

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{AnalyzerError, Result};
use crate::models::Category;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
    General,
}

impl Tier {
    /// Clause-priority order.
    pub const ALL: [Tier; 4] = [Tier::High, Tier::Medium, Tier::Low, Tier::General];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
            Tier::General => "general",
        }
    }

    fn slot(self) -> usize {
        match self {
            Tier::High => 0,
            Tier::Medium => 1,
            Tier::Low => 2,
            Tier::General => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uncompiled pattern source.
#[derive(Debug, Copy, Clone)]
pub struct PatternSpec {
    pub pattern: &'static str,
    /// The pattern does not fire on sentences matching this expression.
    pub unless: Option<&'static str>,
}

const fn p(pattern: &'static str) -> PatternSpec {
    PatternSpec { pattern, unless: None }
}

const fn p_unless(pattern: &'static str, unless: &'static str) -> PatternSpec {
    PatternSpec {
        pattern,
        unless: Some(unless),
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CategorySpec {
    pub category: Category,
    pub high: &'static [PatternSpec],
    pub medium: &'static [PatternSpec],
    pub low: &'static [PatternSpec],
    pub general: &'static [PatternSpec],
}

impl CategorySpec {
    fn tier(&self, tier: Tier) -> &'static [PatternSpec] {
        match tier {
            Tier::High => self.high,
            Tier::Medium => self.medium,
            Tier::Low => self.low,
            Tier::General => self.general,
        }
    }
}

pub const BUILTIN_PATTERNS: [CategorySpec; 6] = [
    CategorySpec {
        category: Category::DataCollection,
        high: &[
            p(r"collect.*biometric"),
            p(r"facial recognition"),
            p(r"track.*exact location"),
            p(r"monitor.*activity"),
            p(r"record.*conversations"),
            p(r"store.*indefinitely"),
            p(r"collect.*without.*consent"),
        ],
        medium: &[
            p(r"collect.*personal information"),
            p(r"store.*data"),
            p(r"cookies"),
            p(r"track.*usage"),
            p(r"retain.*information"),
            p(r"collect.*IP address"),
            p(r"analytics"),
        ],
        low: &[
            p(r"anonymous.*data"),
            p(r"aggregate.*information"),
            p(r"de-identified"),
            p(r"limited.*retention"),
            p(r"minimal.*collection"),
        ],
        general: &[
            p(r"collect"),
            p(r"information"),
            p(r"data"),
            p(r"track"),
            p(r"cookie"),
            p(r"retention"),
        ],
    },
    CategorySpec {
        category: Category::DataSharing,
        high: &[
            p(r"sell.*personal.*data"),
            p(r"share.*with.*third.parties"),
            p(r"transfer.*ownership"),
            p(r"disclose.*information"),
            p(r"provide.*to.*advertisers"),
            p(r"share.*without.*notice"),
        ],
        medium: &[
            p(r"share.*with.*partners"),
            p(r"third.party.*service"),
            p(r"affiliates"),
            p(r"business.*partners"),
            p(r"vendors"),
        ],
        low: &[
            p(r"share.*only with consent"),
            p(r"limited.*sharing"),
            p(r"opt.out"),
            p(r"control.*over.*sharing"),
            p(r"anonymized.*before.*sharing"),
        ],
        general: &[
            p(r"share"),
            p(r"third.party"),
            p(r"partners"),
            p(r"transfer"),
            p(r"disclose"),
        ],
    },
    CategorySpec {
        category: Category::DataSecurity,
        high: &[
            p(r"no.*guarantee.*security"),
            p(r"not.*responsible.*for.*breaches"),
            p(r"as.is"),
            p(r"disclaim.*security"),
            p(r"security.*not.*guaranteed"),
        ],
        medium: &[
            p(r"reasonable.*security"),
            p(r"industry.*standard"),
            p_unless(r"encryption", r"advanced.*encryption"),
            p(r"safeguards"),
            p(r"security.*measures"),
        ],
        low: &[
            p(r"advanced.*encryption"),
            p(r"robust.*security"),
            p(r"regular.*audits"),
            p(r"promptly.*notify.*breach"),
            p(r"comprehensive.*security.*framework"),
        ],
        general: &[
            p(r"security"),
            p(r"protect"),
            p(r"encryption"),
            p(r"breach"),
            p(r"safeguard"),
        ],
    },
    CategorySpec {
        category: Category::UserRights,
        high: &[
            p(r"no.*right.*to.*access"),
            p(r"cannot.*delete"),
            p(r"waive.*rights"),
            p(r"no.*control"),
            p(r"surrender.*rights"),
        ],
        medium: &[
            p(r"may.*request.*deletion"),
            p(r"contact.*us.*to.*access"),
            p(r"limited.*control"),
            p(r"some.*rights"),
        ],
        low: &[
            p(r"right.*to.*access"),
            p(r"right.*to.*delete"),
            p(r"control.*your.*data"),
            p(r"manage.*preferences"),
            p(r"GDPR"),
            p(r"CCPA"),
        ],
        general: &[
            p(r"rights"),
            p(r"access"),
            p(r"delete"),
            p(r"control"),
            p(r"request"),
            p(r"opt.out"),
        ],
    },
    CategorySpec {
        category: Category::Liability,
        high: &[
            p(r"not.*liable"),
            p(r"disclaim.*all.*liability"),
            p(r"no.*warranties"),
            p(r"no.*responsibility"),
            p(r"waive.*right.*to.*sue"),
        ],
        medium: &[
            p(r"limited.*liability"),
            p(r"to.*the.*extent.*permitted.*by.*law"),
            p(r"cap.*on.*damages"),
        ],
        low: &[
            p(r"responsible"),
            p(r"accountable"),
            p(r"compensation.*for.*damages"),
            p(r"liability.*insurance"),
        ],
        general: &[
            p(r"liability"),
            p(r"disclaimer"),
            p(r"damages"),
            p(r"warranty"),
            p(r"responsible"),
        ],
    },
    CategorySpec {
        category: Category::PolicyChanges,
        high: &[
            p(r"change.*without.*notice"),
            p(r"modify.*at.*any.*time"),
            p(r"no.*notification"),
            p(r"deemed.*to.*accept.*changes"),
        ],
        medium: &[
            p(r"periodically.*update"),
            p(r"check.*regularly"),
            p(r"may.*notify"),
            p(r"post.*updates"),
        ],
        low: &[
            p(r"notify.*of.*changes"),
            p(r"email.*about.*updates"),
            p(r"consent.*required"),
            p(r"advance.*notice"),
        ],
        general: &[
            p(r"changes"),
            p(r"updates"),
            p(r"modify"),
            p(r"revise"),
            p(r"amend"),
        ],
    },
];

fn build_regex(source: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// A compiled, case-insensitive, unanchored phrase matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    unless: Option<Regex>,
}

impl Pattern {
    pub fn compile(pattern: &str, unless: Option<&str>) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: build_regex(pattern)?,
            unless: unless.map(build_regex).transpose()?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text) && !self.unless.as_ref().is_some_and(|u| u.is_match(text))
    }
}

#[derive(Debug, Clone)]
pub struct CategoryPatterns {
    pub category: Category,
    tiers: [Vec<Pattern>; 4],
}

impl CategoryPatterns {
    pub fn tier(&self, tier: Tier) -> &[Pattern] {
        &self.tiers[tier.slot()]
    }

    /// First pattern of `tier` matching `text`; later patterns are not tried.
    pub fn first_match(&self, tier: Tier, text: &str) -> Option<&Pattern> {
        self.tier(tier).iter().find(|p| p.is_match(text))
    }
}

/// Read-only registry of compiled patterns, one entry per category in declaration order.
#[derive(Debug, Clone)]
pub struct PatternTable {
    categories: Vec<CategoryPatterns>,
}

static BUILTIN_TABLE: OnceLock<PatternTable> = OnceLock::new();

impl PatternTable {
    /// Compile a table. Every category of `Category::ALL` must appear exactly once;
    /// entries are stored in declaration order regardless of input order.
    pub fn compile(specs: &[CategorySpec]) -> Result<Self> {
        let mut categories = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let mut found = specs.iter().filter(|s| s.category == category);
            let spec = found.next().ok_or(AnalyzerError::IncompleteTable(category))?;
            if found.next().is_some() {
                return Err(AnalyzerError::IncompleteTable(category));
            }

            let compile_tier = |tier: Tier| -> Result<Vec<Pattern>> {
                spec.tier(tier)
                    .iter()
                    .map(|ps| {
                        Pattern::compile(ps.pattern, ps.unless).map_err(|source| AnalyzerError::Pattern {
                            category,
                            tier,
                            pattern: ps.pattern.to_string(),
                            source,
                        })
                    })
                    .collect()
            };

            categories.push(CategoryPatterns {
                category,
                tiers: [
                    compile_tier(Tier::High)?,
                    compile_tier(Tier::Medium)?,
                    compile_tier(Tier::Low)?,
                    compile_tier(Tier::General)?,
                ],
            });
        }

        Ok(Self { categories })
    }

    /// The built-in table, compiled on first use and shared for the process lifetime.
    pub fn builtin() -> &'static PatternTable {
        BUILTIN_TABLE.get_or_init(|| {
            PatternTable::compile(&BUILTIN_PATTERNS).expect("built-in pattern table failed to compile")
        })
    }

    pub fn categories(&self) -> &[CategoryPatterns] {
        &self.categories
    }

    pub fn get(&self, category: Category) -> Option<&CategoryPatterns> {
        self.categories.iter().find(|c| c.category == category)
    }
}
