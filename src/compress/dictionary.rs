//! Phrase dictionary for compression
//!
//! Every phrase in the dictionary is either a single code unit or an existing
//! phrase extended by one code unit, so a phrase is identified by the pair
//! (prefix code, last unit). Single units use [`ROOT`] as their prefix. The
//! table lives for one compression call only.

use crate::common::FIRST_DICT_CODE;
use std::collections::HashMap;

/// Prefix code used for single-unit phrases
pub const ROOT: u32 = u32::MAX;

/// Hash index from (prefix code, unit) to dictionary code
#[derive(Debug)]
pub struct Dictionary {
    codes: HashMap<(u32, u16), u32>,
    next_code: u32,
}

impl Dictionary {
    /// Create an empty dictionary; the first code assigned is 3
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty dictionary sized for roughly `capacity` phrases
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: HashMap::with_capacity(capacity),
            next_code: FIRST_DICT_CODE,
        }
    }

    /// Code of the phrase `prefix + unit`, if present
    pub fn get(&self, prefix: u32, unit: u16) -> Option<u32> {
        self.codes.get(&(prefix, unit)).copied()
    }

    /// Add the phrase `prefix + unit` and return its new code
    pub fn insert(&mut self, prefix: u32, unit: u16) -> u32 {
        let code = self.next_code;
        self.codes.insert((prefix, unit), code);
        self.next_code += 1;
        code
    }

    /// Next code to be assigned (also the dictionary size, control codes included)
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// Number of phrases stored
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no phrase has been stored yet
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
