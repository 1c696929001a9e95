//! Noun lemmatizer implementation.
//!
//! Reduces plural nouns to their singular dictionary form. Irregular plurals
//! are looked up in an exception table; regular plurals go through the usual
//! detachment rules (`-ches` → `-ch`, `-uses` → `-us`, `-ies` → `-y`,
//! `-s` → ``). Words that only look plural (`status`, `business`, `news`)
//! are left alone.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Lemmatizer;

/// Irregular plural → lemma.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
    ("thieves", "thief"),
    ("calves", "calf"),
    ("selves", "self"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("diagnoses", "diagnosis"),
    ("crises", "crisis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("calories", "calorie"),
    ("ties", "tie"),
    ("pies", "pie"),
    ("lies", "lie"),
];

/// Words ending in `s` that are already in lemma form.
const INVARIANT_NOUNS: &[&str] = &[
    "news", "series", "species", "means", "thanks", "always", "perhaps", "towards", "afterwards",
    "whereas", "various", "sometimes", "plus", "yes", "bus", "gas", "lens", "physics",
    "mathematics", "economics", "politics", "ethics", "electronics", "logistics", "statistics",
    "headquarters", "savings", "earnings", "premises", "sales", "goods", "clothes", "scissors",
    "trousers", "pants", "jeans", "alms", "lyrics",
];

/// Nouns ending in `use`, whose plurals would otherwise hit `-uses` → `-us`.
const USE_NOUNS: &[&str] = &[
    "house", "warehouse", "greenhouse", "lighthouse", "cause", "use", "misuse", "excuse", "abuse",
    "pause", "spouse", "blouse", "fuse", "clause", "muse", "ruse", "mouse",
];

static IRREGULAR_NOUNS_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_NOUNS.iter().copied().collect());

static INVARIANT_NOUNS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INVARIANT_NOUNS.iter().copied().collect());

static USE_NOUNS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| USE_NOUNS.iter().copied().collect());

/// Detachment rules, most specific suffix first.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("uses", "us"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("ies", "y"),
    ("s", ""),
];

/// Lemmatizer for English nouns.
#[derive(Debug, Clone, Default)]
pub struct NounLemmatizer;

impl NounLemmatizer {
    /// Create a new noun lemmatizer.
    pub fn new() -> Self {
        NounLemmatizer
    }

    fn looks_singular(word: &str) -> bool {
        word.ends_with("ss") || word.ends_with("us") || word.ends_with("is")
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = IRREGULAR_NOUNS_MAP.get(word) {
            return (*lemma).to_string();
        }

        if word.chars().count() <= 3
            || !word.chars().all(char::is_alphabetic)
            || INVARIANT_NOUNS_SET.contains(word)
            || Self::looks_singular(word)
        {
            return word.to_string();
        }

        if let Some(singular) = word.strip_suffix('s').filter(|w| USE_NOUNS_SET.contains(w)) {
            return singular.to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                // "ies" → "y" needs a consonant stem of at least two letters.
                if *suffix == "ies" && stem.chars().count() < 2 {
                    continue;
                }
                return format!("{stem}{replacement}");
            }
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "noun"
    }
}
