//! Generation parameters and scale rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::GenerateError;

/// Parameters for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Scale factor, 0 selects the small test data set
    pub scale: u32,
    /// First day of the date dimension
    pub start_date: NaiveDate,
    /// Last day of the date dimension (inclusive)
    pub end_date: NaiveDate,
    pub num_customers: usize,
    pub num_items: usize,
    pub num_stores: usize,
    pub num_warehouses: usize,
    pub num_web_sites: usize,
    /// Store-sales multiplier on Saturdays and Sundays
    pub weekend_boost: f64,
    /// Store-sales multiplier on holidays
    pub holiday_boost: f64,
    /// Maximum rows in the store sales table
    pub fact_cap: usize,
    /// Maximum web orders
    pub web_cap: usize,
    /// Maximum catalog orders
    pub catalog_cap: usize,
    /// Seed for a fully reproducible run
    pub seed: Option<u64>,
    /// Date the `d_current_*` flags are computed against
    pub as_of: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            start_date: ymd(2020, 1, 1),
            end_date: ymd(2023, 12, 31),
            num_customers: 100_000,
            num_items: 18_000,
            num_stores: 12,
            num_warehouses: 5,
            num_web_sites: 30,
            weekend_boost: 1.2,
            holiday_boost: 1.5,
            fact_cap: 100_000,
            web_cap: 2_000,
            catalog_cap: 1_500,
            seed: None,
            as_of: chrono::Local::now().date_naive(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration for a scale factor
    ///
    /// Scale 0 is the test mode: one week of dates and a handful of rows per
    /// dimension. Larger scales grow customers and items linearly, stores
    /// and warehouses with the square root.
    pub fn for_scale(scale: u32) -> Self {
        if scale == 0 {
            return Self::test_mode();
        }

        let n = scale as usize;
        let root = (scale as f64).sqrt();
        Self {
            scale,
            num_customers: (100_000 * n).min(1_000_000),
            num_items: 18_000 * n,
            num_stores: 12.max((12.0 * root) as usize),
            num_warehouses: 5.max((5.0 * root) as usize),
            ..Self::default()
        }
    }

    /// The minimal data set used for smoke tests
    pub fn test_mode() -> Self {
        Self {
            scale: 0,
            start_date: ymd(2023, 1, 1),
            end_date: ymd(2023, 1, 7),
            num_customers: 5,
            num_items: 3,
            num_stores: 1,
            num_warehouses: 1,
            num_web_sites: 1,
            ..Self::default()
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.scale == 0
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Number of days in the date dimension
    pub fn num_days(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1).max(0) as usize
    }

    /// Check the configuration can produce a consistent data set
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.end_date < self.start_date {
            return Err(GenerateError::InvalidConfig(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        let counts = [
            ("customers", self.num_customers),
            ("items", self.num_items),
            ("stores", self.num_stores),
            ("warehouses", self.num_warehouses),
            ("web sites", self.num_web_sites),
        ];
        for (name, count) in counts {
            if count == 0 {
                return Err(GenerateError::InvalidConfig(format!(
                    "Number of {} must be at least 1",
                    name
                )));
            }
        }

        if self.weekend_boost <= 0.0 || self.holiday_boost <= 0.0 {
            return Err(GenerateError::InvalidConfig(
                "Sales boosts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
