//! Synthetic person records.

use chrono::{Days, NaiveDate};
use rand::Rng;
use sortcheck_clock::Clock;
use sortcheck_schema::{Record, CATEGORIES};

use crate::config::{GenerationError, GeneratorConfig, NameSource, DEFAULT_NAME_LENGTH};
use crate::names::{GIVEN_NAMES, SURNAMES};

/// Birth dates fall within this many days before today.
pub const BIRTH_WINDOW_DAYS: u64 = 80 * 365;

/// Top-level domains used for generated emails.
pub const TLDS: [&str; 10] = ["com", "gov", "org", "edu", "biz", "co.uk", "dk", "sv", "se", "de"];

/// Produces randomized records.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    config: GeneratorConfig,
    today: NaiveDate,
}

impl RecordGenerator {
    /// Create a generator anchored at the clock's current date.
    pub fn new<C: Clock>(config: GeneratorConfig, clock: &C) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            config,
            today: clock.today(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Latest birth date this generator can produce.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Earliest birth date this generator can produce.
    pub fn earliest_birth_date(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(BIRTH_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn generate_record<R: Rng + ?Sized>(&self, rng: &mut R) -> Record {
        let (given_name, surname) = match self.config.name_source {
            NameSource::Random => (
                random_name(rng, self.config.name_length),
                random_name(rng, self.config.name_length),
            ),
            NameSource::Curated => (
                pick(rng, GIVEN_NAMES).to_string(),
                pick(rng, SURNAMES).to_string(),
            ),
        };

        let email = format!(
            "{}.{}@{}.{}",
            given_name,
            surname,
            random_name(rng, DEFAULT_NAME_LENGTH),
            pick(rng, &TLDS)
        );

        Record {
            surname,
            given_name,
            email,
            category: pick(rng, &CATEGORIES).to_string(),
            birth_date: self.random_birth_date(rng),
        }
    }

    fn random_birth_date<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let days_ago = rng.gen_range(0..=BIRTH_WINDOW_DAYS);
        self.today
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Random token: one uppercase letter followed by `length - 1` lowercase letters.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let mut name = String::with_capacity(length);
    if length == 0 {
        return name;
    }
    name.push(rng.gen_range(b'A'..=b'Z') as char);
    for _ in 1..length {
        name.push(rng.gen_range(b'a'..=b'z') as char);
    }
    name
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}
