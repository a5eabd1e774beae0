//! Stochastic L-system rewriting engine.
//!
//! An [`LSystem`] owns an axiom, a table of weighted [`ProductionRule`]s and a
//! seedable RNG. [`LSystem::generate`] expands the axiom through a number of
//! parallel rewrite passes and returns the final sentence, which is what the
//! [`TreeInterpreter`](crate::interpreter::TreeInterpreter) consumes.
//!
//! Rule selection is a cumulative-weight draw over all alternatives registered
//! for a symbol, so a grammar can mix deterministic rules (one alternative)
//! with stochastic ones (several). Reseed with [`LSystem::set_seed`] to make
//! the whole expansion reproducible.

use crate::error::GrowthError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};

/// A single weighted replacement for one predecessor symbol.
#[derive(Clone, Debug)]
pub struct ProductionRule {
    /// Replacement sequence appended whenever this rule fires.
    pub successor: String,
    /// Relative selection weight among this predecessor's alternatives.
    /// Always positive; non-positive rules are rejected at registration.
    pub weight: f32,
}

/// A stochastic context-free L-system.
pub struct LSystem {
    axiom: String,
    // Alternatives per predecessor keep their registration order; that order
    // is the tie-break for the cumulative-weight draw.
    rules: HashMap<char, Vec<ProductionRule>>,
    rng: StdRng,
}

impl LSystem {
    /// Creates an empty system (no axiom, no rules) seeded from OS entropy.
    ///
    /// Call [`set_seed`](Self::set_seed) afterwards for reproducible output.
    pub fn new() -> Self {
        Self {
            axiom: String::new(),
            rules: HashMap::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reseeds the rule-selection RNG. A fixed grammar + axiom + seed +
    /// generation count then yields an identical sentence on every call.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replaces the starting sentence. Any sequence is accepted, including
    /// the empty one.
    pub fn set_axiom(&mut self, axiom: &str) {
        self.axiom = axiom.to_owned();
    }

    /// Registers `predecessor -> successor` with the given weight.
    ///
    /// Multiple rules may share a predecessor (stochastic grammar). Rules
    /// with `weight <= 0` are dropped here and never stored, so they cannot
    /// be selected by any code path.
    pub fn add_rule(&mut self, predecessor: char, successor: &str, weight: f32) {
        if weight <= 0.0 {
            log::debug!("dropping rule {predecessor} -> {successor:?} with weight {weight}");
            return;
        }
        self.rules.entry(predecessor).or_default().push(ProductionRule {
            successor: successor.to_owned(),
            weight,
        });
    }

    /// Removes every rule. The axiom is untouched.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Number of stored alternatives for `predecessor`.
    pub fn rule_count(&self, predecessor: char) -> usize {
        self.rules.get(&predecessor).map_or(0, Vec::len)
    }

    /// Expands the axiom through `generations` parallel rewrite passes.
    ///
    /// Zero generations returns the axiom unchanged. Each pass rewrites every
    /// symbol of the current sentence before the next pass begins, so a
    /// symbol introduced in pass `k` is only rewritten from pass `k + 1` on
    /// (classic simultaneous L-system semantics).
    ///
    /// Output length is unbounded: grammars whose alternatives mostly
    /// lengthen the sentence grow exponentially in `generations`. The engine
    /// does not cap this; an allocation failure surfaces as
    /// [`GrowthError::Expansion`].
    pub fn generate(&mut self, generations: u32) -> Result<String, GrowthError> {
        let mut current = self.axiom.clone();
        for pass in 0..generations {
            current = self.apply_once(&current)?;
            log::debug!("generation {}: {} symbols", pass + 1, current.len());
        }
        Ok(current)
    }

    /// One parallel rewrite pass over `input`.
    fn apply_once(&mut self, input: &str) -> Result<String, GrowthError> {
        let mut output = String::new();
        // Most tree grammars roughly double per pass; reserving ahead keeps
        // reallocation (and its failure point) in one place.
        try_grow(&mut output, input.len() * 2)?;

        for c in input.chars() {
            let Some(alternatives) = self.rules.get(&c).filter(|r| !r.is_empty()) else {
                try_grow(&mut output, c.len_utf8())?;
                output.push(c);
                continue;
            };

            let chosen = if alternatives.len() == 1 {
                // Deterministic fast path: no randomness consumed.
                &alternatives[0]
            } else {
                let total: f32 = alternatives.iter().map(|r| r.weight).sum();
                if total <= 0.0 {
                    // Cannot happen for stored rules; copy through anyway.
                    try_grow(&mut output, c.len_utf8())?;
                    output.push(c);
                    continue;
                }
                let draw = self.rng.random_range(0.0..=total);
                let mut accum = 0.0;
                // Fall back to the last alternative if accumulated float
                // error leaves the draw above every cumulative sum.
                let mut chosen = &alternatives[alternatives.len() - 1];
                for rule in alternatives {
                    accum += rule.weight;
                    if draw <= accum {
                        chosen = rule;
                        break;
                    }
                }
                chosen
            };

            try_grow(&mut output, chosen.successor.len())?;
            output.push_str(&chosen.successor);
        }

        Ok(output)
    }
}

impl Default for LSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Reserves room for `additional` more bytes, surfacing allocation failure
/// instead of aborting.
fn try_grow(out: &mut String, additional: usize) -> Result<(), GrowthError> {
    out.try_reserve(additional).map_err(|_| GrowthError::Expansion {
        sentence_len: out.len(),
    })
}

/// Symbol-frequency report for a generated sentence, sorted by symbol.
///
/// Diagnostic side-channel for grammar tuning; not consumed by the
/// interpreter.
pub fn symbol_census(sentence: &str) -> Vec<(char, usize)> {
    let mut counts = BTreeMap::new();
    for c in sentence.chars() {
        *counts.entry(c).or_insert(0usize) += 1;
    }
    counts.into_iter().collect()
}
