//! Synthetic data generation
//!
//! Builds the dimension tables first, keeping each table's surrogate keys
//! as an in-memory pool, then samples those pools to build the sales and
//! returns facts. Every reference a generated row carries is drawn from a
//! pool that already exists, so the output is referentially consistent by
//! construction.
//!
//! Tables are built on demand: asking for a table first materializes every
//! table it references, following the reference graph in [`TpcdsTable`].

pub mod config;
mod dimensions;
mod facts;
pub mod lookups;
pub mod weighted;
mod writer;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::database::Row;
use crate::tables::TpcdsTable;

pub use config::GeneratorConfig;
pub use dimensions::is_holiday;
pub use weighted::WeightedChoice;
pub use writer::{GenerationSummary, format_row};

use facts::{CatalogSale, StoreSale, WebSale};

/// Error type for data generation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// The configuration cannot produce a consistent data set
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// A reference was requested from a pool with no keys
    #[error("Empty key pool: {0}")]
    EmptyPool(String),

    /// Writing output files failed
    #[error("IO error: {0}")]
    Io(String),
}

/// Date attributes the fact generators need
#[derive(Debug, Clone, Copy)]
struct DateAttrs {
    sk: i64,
    month: u32,
    weekend: bool,
    holiday: bool,
}

/// Item attributes the fact generators need
#[derive(Debug, Clone, Copy)]
struct ItemAttrs {
    sk: i64,
    price: f64,
    wholesale: f64,
    /// Index into the category lookup
    category: usize,
}

/// Store attributes the fact generators need
#[derive(Debug, Clone, Copy)]
struct StoreAttrs {
    sk: i64,
    floor_space: i64,
    tax: f64,
}

/// The fixed categorical distributions
struct Distributions {
    dep_count: WeightedChoice<i64>,
    income_band: WeightedChoice<i64>,
    reason: WeightedChoice<i64>,
    store_quantity: WeightedChoice<i64>,
    web_quantity: WeightedChoice<i64>,
    catalog_quantity: WeightedChoice<i64>,
}

impl Distributions {
    fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            dep_count: WeightedChoice::new(
                (0..).zip([20.0, 25.0, 30.0, 15.0, 8.0, 2.0]),
            )?,
            income_band: WeightedChoice::new(
                (1..).zip(lookups::INCOME_BANDS.iter().map(|(_, _, share)| *share)),
            )?,
            reason: WeightedChoice::new((1..).zip(lookups::REASONS.iter().map(|(_, w)| *w)))?,
            store_quantity: WeightedChoice::new((1..).zip([60.0, 25.0, 10.0, 3.0, 2.0]))?,
            web_quantity: WeightedChoice::new((1..).zip([70.0, 25.0, 5.0]))?,
            catalog_quantity: WeightedChoice::new((1..).zip([50.0, 30.0, 15.0, 5.0]))?,
        })
    }
}

/// Generator of a complete synthetic data set
pub struct SyntheticGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    weights: Distributions,
    /// Rows of every materialized table, in column order
    tables: BTreeMap<TpcdsTable, Vec<Row>>,
    /// Surrogate keys of every materialized dimension
    pools: BTreeMap<TpcdsTable, Vec<i64>>,
    dates: Vec<DateAttrs>,
    items: Vec<ItemAttrs>,
    stores: Vec<StoreAttrs>,
    store_sales: Vec<StoreSale>,
    web_sales: Vec<WebSale>,
    catalog_sales: Vec<CatalogSale>,
}

impl SyntheticGenerator {
    /// Create a generator
    ///
    /// # Returns
    /// `InvalidConfig` when the configuration cannot produce consistent data
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            rng,
            weights: Distributions::new()?,
            tables: BTreeMap::new(),
            pools: BTreeMap::new(),
            dates: Vec::new(),
            items: Vec::new(),
            stores: Vec::new(),
            store_sales: Vec::new(),
            web_sales: Vec::new(),
            catalog_sales: Vec::new(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Tables a full run materializes explicitly
    ///
    /// Test mode asks for the core dimensions and store sales only; the
    /// tables those reference are still built on demand.
    pub fn plan(&self) -> Vec<TpcdsTable> {
        if self.config.is_test_mode() {
            vec![
                TpcdsTable::DateDim,
                TpcdsTable::Customer,
                TpcdsTable::Item,
                TpcdsTable::Store,
                TpcdsTable::Warehouse,
                TpcdsTable::ShipMode,
                TpcdsTable::TimeDim,
                TpcdsTable::Reason,
                TpcdsTable::IncomeBand,
                TpcdsTable::HouseholdDemographics,
                TpcdsTable::WebSite,
                TpcdsTable::StoreSales,
            ]
        } else {
            TpcdsTable::create_order()
                .into_iter()
                .filter(|t| TpcdsTable::DATA_TABLES.contains(t))
                .collect()
        }
    }

    /// Materialize every table in the plan
    pub fn generate_all(&mut self) -> Result<(), GenerateError> {
        for table in self.plan() {
            self.ensure(table)?;
        }
        Ok(())
    }

    /// Materialize a table (and what it references) and return its rows
    pub fn generate(&mut self, table: TpcdsTable) -> Result<&[Row], GenerateError> {
        self.ensure(table)?;
        Ok(self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Rows of a materialized table
    pub fn rows(&self, table: TpcdsTable) -> Option<&[Row]> {
        self.tables.get(&table).map(Vec::as_slice)
    }

    /// Surrogate keys of a materialized dimension
    pub fn key_pool(&self, table: TpcdsTable) -> Option<&[i64]> {
        self.pools.get(&table).map(Vec::as_slice)
    }

    /// Tables materialized so far
    pub fn materialized(&self) -> Vec<TpcdsTable> {
        self.tables.keys().copied().collect()
    }

    /// Generate the planned tables and write one `<table>.dat` per table
    ///
    /// # Arguments
    /// * `dir` - Output directory, created if missing
    pub fn write_to(&mut self, dir: &Path) -> Result<GenerationSummary, GenerateError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            GenerateError::Io(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        tracing::info!("Writing synthetic data files to {}", dir.display());

        self.generate_all()?;

        let mut summary = GenerationSummary::new(dir);
        for (table, rows) in &self.tables {
            writer::write_table(dir, *table, rows)?;
            tracing::info!("Wrote {} rows to {}", rows.len(), table.file_name());
            summary.record(*table, rows.len());
        }
        summary.files_found = writer::count_data_files(dir)?;

        tracing::info!(
            "Generated {} data files ({} rows)",
            summary.files_found,
            summary.total_rows()
        );
        Ok(summary)
    }

    /// Build a table unless it exists, after everything it references
    fn ensure(&mut self, table: TpcdsTable) -> Result<(), GenerateError> {
        if self.tables.contains_key(&table) {
            return Ok(());
        }
        for dependency in table.dependencies() {
            self.ensure(dependency)?;
        }

        tracing::debug!("Generating {}", table);
        let rows = self.build(table)?;
        if !table.is_fact() {
            let keys = rows
                .iter()
                .filter_map(|row| row.first().and_then(|v| v.as_i64()))
                .collect();
            self.pools.insert(table, keys);
        }
        self.tables.insert(table, rows);
        Ok(())
    }

    fn build(&mut self, table: TpcdsTable) -> Result<Vec<Row>, GenerateError> {
        match table {
            TpcdsTable::DateDim => Ok(self.date_dim()),
            TpcdsTable::CustomerDemographics => Ok(self.customer_demographics()),
            TpcdsTable::CustomerAddress => Ok(self.customer_addresses()),
            TpcdsTable::Warehouse => Ok(self.warehouses()),
            TpcdsTable::Store => Ok(self.stores()),
            TpcdsTable::Item => Ok(self.items()),
            TpcdsTable::Customer => self.customers(),
            TpcdsTable::ShipMode => Ok(self.ship_modes()),
            TpcdsTable::TimeDim => Ok(self.time_dim()),
            TpcdsTable::Reason => Ok(self.reasons()),
            TpcdsTable::IncomeBand => Ok(self.income_bands()),
            TpcdsTable::HouseholdDemographics => Ok(self.household_demographics()),
            TpcdsTable::WebSite => self.web_sites(),
            TpcdsTable::CallCenter => self.call_centers(),
            TpcdsTable::Promotion => self.promotions(),
            TpcdsTable::WebPage => self.web_pages(),
            TpcdsTable::CatalogPage => self.catalog_pages(),
            TpcdsTable::Inventory => self.inventory(),
            TpcdsTable::StoreSales => self.store_sales(),
            TpcdsTable::WebSales => self.web_sales(),
            TpcdsTable::CatalogSales => self.catalog_sales(),
            TpcdsTable::StoreReturns => self.store_returns(),
            TpcdsTable::WebReturns => self.web_returns(),
            TpcdsTable::CatalogReturns => self.catalog_returns(),
            TpcdsTable::DbgenVersion => Err(GenerateError::InvalidConfig(
                "dbgen_version is not generated".to_string(),
            )),
        }
    }

    /// Uniformly random key from a materialized pool
    fn pick(&mut self, table: TpcdsTable) -> Result<i64, GenerateError> {
        let pool = self
            .pools
            .get(&table)
            .filter(|keys| !keys.is_empty())
            .ok_or_else(|| GenerateError::EmptyPool(table.to_string()))?;
        Ok(pool[self.rng.gen_range(0..pool.len())])
    }

    /// A key from a pool with probability `p`, otherwise None
    fn pick_sometimes(&mut self, table: TpcdsTable, p: f64) -> Result<Option<i64>, GenerateError> {
        if self.chance(p) {
            self.pick(table).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Uniform choice from a fixed, non-empty list
    fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn flag(&mut self) -> &'static str {
        self.choose(&["Y", "N"])
    }

    fn item_attrs(&mut self) -> Result<ItemAttrs, GenerateError> {
        if self.items.is_empty() {
            return Err(GenerateError::EmptyPool(TpcdsTable::Item.to_string()));
        }
        Ok(self.items[self.rng.gen_range(0..self.items.len())])
    }

    /// Largest date key, the bound every shifted date is clamped to
    fn last_date_key(&self) -> Result<i64, GenerateError> {
        self.dates
            .last()
            .map(|d| d.sk)
            .ok_or_else(|| GenerateError::EmptyPool(TpcdsTable::DateDim.to_string()))
    }

    /// Date key `days` after `sk`, clamped to the dimension
    fn shift_date(
        &mut self,
        sk: i64,
        days: std::ops::RangeInclusive<i64>,
    ) -> Result<i64, GenerateError> {
        let last = self.last_date_key()?;
        Ok((sk + self.rng.gen_range(days)).min(last))
    }

    /// Date key of a calendar date, clamped to the dimension's range
    fn date_key(&self, date: NaiveDate) -> Result<i64, GenerateError> {
        let last = self.last_date_key()?;
        let start = self.config.start_date;
        if date <= start {
            return Ok(1);
        }
        Ok(((date - start).num_days() + 1).min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn generator() -> SyntheticGenerator {
        SyntheticGenerator::new(GeneratorConfig::test_mode().with_seed(Some(7))).unwrap()
    }

    /// Every non-null reference of every materialized table is in its pool
    fn assert_referential_integrity(generator: &SyntheticGenerator) {
        for table in generator.materialized() {
            let rows = generator.rows(table).unwrap();
            for key in table.foreign_keys() {
                let idx = table.column_index(key.column).unwrap();
                let pool = generator.key_pool(key.references);
                for row in rows {
                    if let Value::Int(sk) = row[idx] {
                        let pool = pool.unwrap_or_else(|| {
                            panic!("{} references unmaterialized {}", table, key.references)
                        });
                        assert!(
                            pool.contains(&sk),
                            "{}.{} = {} not in {}",
                            table,
                            key.column,
                            sk,
                            key.references
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rows_match_column_layout() {
        let mut generator = generator();
        generator.generate_all().unwrap();
        for table in generator.materialized() {
            let width = table.columns().len();
            for row in generator.rows(table).unwrap() {
                assert_eq!(row.len(), width, "{} row width", table);
            }
        }
    }

    #[test]
    fn test_lazy_dependencies() {
        let mut generator = generator();
        generator.generate(TpcdsTable::StoreReturns).unwrap();
        for table in [
            TpcdsTable::StoreSales,
            TpcdsTable::Customer,
            TpcdsTable::CustomerAddress,
            TpcdsTable::Promotion,
            TpcdsTable::Reason,
        ] {
            assert!(generator.rows(table).is_some(), "{} not built", table);
        }
        assert!(generator.rows(TpcdsTable::WebSales).is_none());
    }

    #[test]
    fn test_referential_integrity_full_set() {
        let mut config = GeneratorConfig::test_mode().with_seed(Some(11));
        config.scale = 1;
        config.num_customers = 200;
        config.num_items = 40;
        config.num_stores = 3;
        config.num_warehouses = 2;
        config.num_web_sites = 2;
        config.end_date = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap();
        let mut generator = SyntheticGenerator::new(config).unwrap();
        generator.generate_all().unwrap();

        assert_eq!(generator.materialized().len(), 24);
        assert!(!generator.rows(TpcdsTable::CatalogSales).unwrap().is_empty());
        assert_referential_integrity(&generator);
    }

    #[test]
    fn test_referential_integrity_test_mode() {
        let mut generator = generator();
        generator.generate_all().unwrap();
        assert_referential_integrity(&generator);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut a = generator();
        let mut b = generator();
        assert_eq!(
            a.generate(TpcdsTable::StoreSales).unwrap(),
            b.generate(TpcdsTable::StoreSales).unwrap()
        );
    }

    #[test]
    fn test_dbgen_version_is_not_generated() {
        let mut generator = generator();
        assert!(matches!(
            generator.generate(TpcdsTable::DbgenVersion),
            Err(GenerateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_date_key_clamps() {
        let mut generator = generator();
        generator.generate(TpcdsTable::DateDim).unwrap();
        let before = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        let inside = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let after = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(generator.date_key(before).unwrap(), 1);
        assert_eq!(generator.date_key(inside).unwrap(), 3);
        assert_eq!(generator.date_key(after).unwrap(), 7);
    }
}
