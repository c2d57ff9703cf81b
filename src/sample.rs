// src/sample.rs
//! Population filtering and Bernoulli sampling.
//!
//! The sample size is approximate: each eligible row is kept independently
//! with probability `fraction`, so a run asking for N rows returns N on
//! average, not exactly N.

use csv::StringRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::calendar::QUARTER_COLUMN;
use crate::error::DataError;
use crate::load::Table;

/// Drop every row whose quarter column equals `excluded`.
pub fn exclude_quarter(table: Table, excluded: &str) -> Result<Table, DataError> {
    let idx = table.column_index(QUARTER_COLUMN)?;
    let before = table.len();
    let Table { headers, rows } = table;
    let rows: Vec<StringRecord> = rows
        .into_iter()
        .filter(|r| r.get(idx) != Some(excluded))
        .collect();
    debug!(excluded, before, after = rows.len(), "filtered population");
    Ok(Table { headers, rows })
}

/// `target / population`. Fails when the population is empty or the ratio
/// falls outside `(0, 1]`, since sampling without replacement can't exceed
/// the population.
pub fn sampling_fraction(target: u64, population: u64) -> Result<f64, DataError> {
    if population == 0 {
        return Err(DataError::EmptyPopulation);
    }
    let fraction = target as f64 / population as f64;
    if fraction <= 0.0 || fraction > 1.0 {
        return Err(DataError::FractionOutOfRange {
            fraction,
            target,
            population,
        });
    }
    Ok(fraction)
}

pub struct Sampler<R = StdRng> {
    fraction: f64,
    rng: R,
}

impl Sampler<StdRng> {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn new(fraction: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(fraction, rng)
    }
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(fraction: f64, rng: R) -> Self {
        Self { fraction, rng }
    }

    /// Expected output size for `population` rows.
    pub fn expected_len(&self, population: usize) -> f64 {
        self.fraction * population as f64
    }

    /// Keep each row with probability `fraction`, preserving input order.
    pub fn sample(&mut self, rows: Vec<StringRecord>) -> Vec<StringRecord> {
        let population = rows.len();
        let fraction = self.fraction;
        let rng = &mut self.rng;
        let kept: Vec<StringRecord> = rows
            .into_iter()
            .filter(|_| rng.gen::<f64>() < fraction)
            .collect();
        info!(
            population,
            fraction,
            expected = self.expected_len(population),
            sampled = kept.len(),
            "sampled rows"
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(quarters: &[&str]) -> Table {
        Table {
            headers: vec!["Half_Quarter".into(), "Final Revenue".into()],
            rows: quarters
                .iter()
                .enumerate()
                .map(|(i, q)| StringRecord::from(vec![q.to_string(), i.to_string()]))
                .collect(),
        }
    }

    #[test]
    fn test_fraction() {
        assert_eq!(sampling_fraction(5428, 10856).unwrap(), 0.5);
        assert_eq!(sampling_fraction(184, 184).unwrap(), 1.0);
    }

    #[test]
    fn test_fraction_empty_population() {
        assert!(matches!(
            sampling_fraction(10, 0),
            Err(DataError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_fraction_out_of_range() {
        assert!(matches!(
            sampling_fraction(11, 10),
            Err(DataError::FractionOutOfRange { population: 10, .. })
        ));
        assert!(matches!(
            sampling_fraction(0, 10),
            Err(DataError::FractionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_exclude_quarter() {
        let t = table(&["2017 Q3", "2017 Q2", "2017 Q3", "2016 Q4"]);
        let t = exclude_quarter(t, "2017 Q3").unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.rows.iter().all(|r| &r[0] != "2017 Q3"));
        assert_eq!(&t.rows[0][1], "1");
        assert_eq!(&t.rows[1][1], "3");
    }

    #[test]
    fn test_exclude_needs_quarter_column() {
        let t = Table {
            headers: vec!["Half.Quarter".into()],
            rows: vec![],
        };
        assert!(matches!(
            exclude_quarter(t, "2017 Q3"),
            Err(DataError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_full_fraction_keeps_everything() {
        let t = table(&["2017 Q2"; 184]);
        let fraction = sampling_fraction(184, t.len() as u64).unwrap();
        let mut sampler = Sampler::new(fraction, Some(7));
        let kept = sampler.sample(t.rows.clone());
        assert_eq!(kept.len(), 184);
        assert_eq!(kept, t.rows);
    }

    #[test]
    fn test_sample_size_is_approximate() {
        let rows: Vec<StringRecord> = (0..10_000)
            .map(|i| StringRecord::from(vec![i.to_string()]))
            .collect();
        let mut sampler = Sampler::new(0.5, Some(42));
        let kept = sampler.sample(rows);
        // sd = 50; allow 6 sd either side
        assert!((4_700..=5_300).contains(&kept.len()), "got {}", kept.len());
        // order preserved
        let ids: Vec<u32> = kept.iter().map(|r| r[0].parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_seed_same_sample() {
        let rows: Vec<StringRecord> = (0..500)
            .map(|i| StringRecord::from(vec![i.to_string()]))
            .collect();
        let a = Sampler::new(0.3, Some(9)).sample(rows.clone());
        let b = Sampler::new(0.3, Some(9)).sample(rows);
        assert_eq!(a, b);
    }
}
