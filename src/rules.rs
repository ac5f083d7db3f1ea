//! Topic-specific score overrides, expressed as data.
//!
//! Generic term overlap cannot tell near-synonyms apart ("brevete" is a
//! driver's license) and lets unrelated procedures leak into a topic (birth
//! queries surfacing vehicle registration because both mention "registro").
//! Each [`OverrideRule`] recognizes a topic from the raw query and nudges the
//! score of every record up or down. Rules are independent and purely
//! additive; only the tiers inside one rule are ordered.

use crate::normalize::clean_query;

pub const RECONVERSION_PHRASES: &[&str] = &[
    "evaluacion y aprobacion del programa de reconversion",
    "evaluacion y aprobacion del programa de reconversion forestal",
    "evaluacion y aprobacion del programa de reconversion agraria",
];
pub const RECONVERSION_KEYWORDS: &[&str] = &[
    "evaluacion",
    "aprobacion",
    "programa",
    "reconversion",
    "forestal",
    "agrario",
];

pub const BUILDING_PHRASES: &[&str] = &[
    "licencia de edificacion",
    "licencia de edificación modalidad c edificaciones de uso mixto con vivienda",
    "licencia de edificación modalidad d",
];
pub const BUILDING_KEYWORDS: &[&str] = &[
    "edificacion",
    "construccion",
    "obra",
    "licencia",
    "declaratoria de fabrica",
    "ampliacion",
    "remodelacion",
];

pub const LICENSE_PHRASES: &[&str] =
    &["licencia de conducir", "brevete", "pase de conducir"];

pub const BIRTH_PHRASES: &[&str] = &[
    "inscripcion de partidas",
    "partida de nacimiento",
    "registro de nacimiento",
    "registro civil",
];
pub const BIRTH_KEYWORDS: &[&str] = &[
    "nacimiento",
    "recien nacido",
    "inscribir",
    "registrar",
    "bebe",
    "hijo",
    "partida",
    "inscripcion de partida de nacimiento ordinaria",
];

pub const VEHICLE_WORDS: &[&str] = &[
    "vehiculo",
    "moto",
    "triciclo",
    "placa",
    "motorizado",
    "no motorizado",
];
/// Query vocabulary that marks a query as vehicle-related.
pub const VEHICLE_QUERY_WORDS: &[&str] = &[
    "vehiculo",
    "moto",
    "triciclo",
    "placa",
    "motorizado",
    "no motorizado",
    "licencia",
    "conducir",
];

pub const SEPARATION_TRIGGERS: &[&str] =
    &["divorcio", "separacion", "separarme", "divorciarme"];
pub const SEPARATION_PHRASES: &[&str] = &[
    "separacion convencional",
    "divorcio ulterior",
    "separacion de mutuo acuerdo",
];
const FAMILY_WORDS: &[&str] = &["matrimonio", "familia"];

/// A set of keywords and how they must occur in a lowercased haystack.
#[derive(Debug, Clone, Copy)]
pub enum Keywords {
    /// Any keyword occurs verbatim.
    Any(&'static [&'static str]),
    /// Any phrase occurs verbatim or in its stop-word-free form.
    Phrase(&'static [&'static str]),
    /// Every keyword occurs.
    All(&'static [&'static str]),
}

impl Keywords {
    pub fn matches(&self, haystack: &str) -> bool {
        match *self {
            Keywords::Any(words) => words.iter().any(|w| haystack.contains(w)),
            Keywords::Phrase(phrases) => {
                phrases.iter().any(|p| phrase_occurs(haystack, p))
            }
            Keywords::All(words) => {
                !words.is_empty() && words.iter().all(|w| haystack.contains(w))
            }
        }
    }
}

/// True if `phrase` or its cleaned form occurs in `haystack`.
pub fn phrase_occurs(haystack: &str, phrase: &str) -> bool {
    if haystack.contains(phrase) {
        return true;
    }
    let cleaned = clean_query(phrase);
    !cleaned.is_empty() && haystack.contains(&cleaned)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub field: Field,
    pub keywords: Keywords,
    pub delta: i64,
}

/// When a rule applies, tested against the raw lowercased query.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    AnyOf(&'static [&'static str]),
    NoneOf(&'static [&'static str]),
}

impl Trigger {
    pub fn fires(&self, raw_query: &str) -> bool {
        match *self {
            Trigger::AnyOf(words) => words.iter().any(|w| raw_query.contains(w)),
            Trigger::NoneOf(words) => {
                !words.iter().any(|w| raw_query.contains(w))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Penalty {
    /// Neither title nor description mentions any keyword.
    Unrelated { keywords: Keywords, delta: i64 },
    /// The title mentions any keyword.
    TitleMentions { keywords: Keywords, delta: i64 },
}

impl Penalty {
    fn delta(&self, title: &str, description: &str) -> i64 {
        match *self {
            Penalty::Unrelated { keywords, delta } => {
                if keywords.matches(title) || keywords.matches(description) {
                    0
                } else {
                    delta
                }
            }
            Penalty::TitleMentions { keywords, delta } => {
                if keywords.matches(title) { delta } else { 0 }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverrideRule {
    pub name: &'static str,
    pub trigger: Trigger,
    /// Evaluated in order; the first matching tier contributes its delta.
    pub tiers: &'static [Tier],
    pub penalties: &'static [Penalty],
}

impl OverrideRule {
    /// Score adjustment for one record. `title` and `description` must be
    /// lowercased.
    pub fn delta(&self, raw_query: &str, title: &str, description: &str) -> i64 {
        if !self.trigger.fires(raw_query) {
            return 0;
        }

        let tier = self
            .tiers
            .iter()
            .find(|tier| {
                let haystack = match tier.field {
                    Field::Title => title,
                    Field::Description => description,
                };
                tier.keywords.matches(haystack)
            })
            .map_or(0, |tier| tier.delta);

        let penalties: i64 = self
            .penalties
            .iter()
            .map(|p| p.delta(title, description))
            .sum();

        tier + penalties
    }
}

pub static OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule {
        name: "reconversion",
        trigger: Trigger::AnyOf(RECONVERSION_KEYWORDS),
        tiers: &[
            Tier {
                field: Field::Title,
                keywords: Keywords::Phrase(RECONVERSION_PHRASES),
                delta: 150,
            },
            Tier {
                field: Field::Title,
                keywords: Keywords::Any(RECONVERSION_KEYWORDS),
                delta: 50,
            },
            Tier {
                field: Field::Description,
                keywords: Keywords::Any(RECONVERSION_KEYWORDS),
                delta: 25,
            },
        ],
        penalties: &[],
    },
    OverrideRule {
        name: "building",
        trigger: Trigger::AnyOf(BUILDING_KEYWORDS),
        tiers: &[
            Tier {
                field: Field::Title,
                keywords: Keywords::Phrase(BUILDING_PHRASES),
                delta: 150,
            },
            Tier {
                field: Field::Title,
                keywords: Keywords::Any(BUILDING_KEYWORDS),
                delta: 60,
            },
            Tier {
                field: Field::Description,
                keywords: Keywords::Any(BUILDING_KEYWORDS),
                delta: 30,
            },
        ],
        penalties: &[],
    },
    OverrideRule {
        name: "driving-license",
        trigger: Trigger::AnyOf(LICENSE_PHRASES),
        tiers: &[
            Tier {
                field: Field::Title,
                keywords: Keywords::Phrase(LICENSE_PHRASES),
                delta: 70,
            },
            Tier {
                field: Field::Description,
                keywords: Keywords::Any(LICENSE_PHRASES),
                delta: 35,
            },
        ],
        penalties: &[Penalty::Unrelated {
            keywords: Keywords::Phrase(LICENSE_PHRASES),
            delta: -150,
        }],
    },
    OverrideRule {
        name: "birth",
        trigger: Trigger::AnyOf(BIRTH_KEYWORDS),
        tiers: &[
            Tier {
                field: Field::Title,
                keywords: Keywords::Phrase(BIRTH_PHRASES),
                delta: 40,
            },
            Tier {
                field: Field::Title,
                keywords: Keywords::Any(BIRTH_KEYWORDS),
                delta: 20,
            },
            Tier {
                field: Field::Description,
                keywords: Keywords::Any(BIRTH_KEYWORDS),
                delta: 10,
            },
        ],
        penalties: &[Penalty::TitleMentions {
            keywords: Keywords::Any(VEHICLE_WORDS),
            delta: -300,
        }],
    },
    OverrideRule {
        name: "separation",
        trigger: Trigger::AnyOf(SEPARATION_TRIGGERS),
        tiers: &[
            Tier {
                field: Field::Title,
                keywords: Keywords::Phrase(SEPARATION_PHRASES),
                delta: 10,
            },
            Tier {
                field: Field::Title,
                keywords: Keywords::Any(FAMILY_WORDS),
                delta: 2,
            },
        ],
        penalties: &[],
    },
    OverrideRule {
        name: "vehicle-certificate",
        trigger: Trigger::AnyOf(&["constancia vehicular"]),
        tiers: &[Tier {
            field: Field::Title,
            keywords: Keywords::All(&["constancia", "vehicular"]),
            delta: 10,
        }],
        penalties: &[],
    },
    OverrideRule {
        name: "vehicle-guard",
        trigger: Trigger::NoneOf(VEHICLE_QUERY_WORDS),
        tiers: &[],
        penalties: &[Penalty::TitleMentions {
            keywords: Keywords::Any(VEHICLE_WORDS),
            delta: -100,
        }],
    },
];

/// Sum of all rule adjustments for one record.
pub fn total_delta(raw_query: &str, title: &str, description: &str) -> i64 {
    OVERRIDE_RULES
        .iter()
        .map(|rule| rule.delta(raw_query, title, description))
        .sum()
}
