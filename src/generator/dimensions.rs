//! Dimension table builders
//!
//! Each builder returns rows in the column order of its table. The first
//! column of every dimension is its surrogate key, numbered from 1.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;

use super::lookups::{self, CATEGORIES, REGIONS};
use super::{DateAttrs, GenerateError, ItemAttrs, StoreAttrs, SyntheticGenerator};
use crate::database::Row;
use crate::tables::TpcdsTable;
use crate::value::{Value, round2, round4};

/// Fixed holidays: New Year, Independence Day, Thanksgiving, Christmas Eve,
/// Christmas and New Year's Eve
pub fn is_holiday(date: NaiveDate) -> bool {
    match (date.month(), date.day()) {
        (1, 1) | (7, 4) | (12, 24) | (12, 25) | (12, 31) => true,
        (11, 22..=28) => date.weekday() == Weekday::Thu,
        _ => false,
    }
}

fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn yes_no(value: bool) -> &'static str {
    if value { "Y" } else { "N" }
}

fn quarter(date: NaiveDate) -> i64 {
    (date.month0() / 3 + 1) as i64
}

impl SyntheticGenerator {
    pub(super) fn date_dim(&mut self) -> Vec<Row> {
        let start = self.config.start_date;
        let end = self.config.end_date;
        let as_of = self.config.as_of;
        let start_quarter = quarter(start);

        let mut rows: Vec<Row> = Vec::with_capacity(self.config.num_days());
        self.dates.clear();
        let mut previous_holiday = false;

        for (idx, date) in start.iter_days().take_while(|d| *d <= end).enumerate() {
            let sk = idx as i64 + 1;
            let years = (date.year() - start.year()) as i64;
            let month = date.month() as i64;
            let qoy = quarter(date);
            let week_seq = (date - start).num_days() / 7 + 1;
            let month_seq = years * 12 + month - start.month() as i64 + 1;
            let quarter_seq = years * 4 + qoy - start_quarter + 1;
            let fy_year = if month >= 7 { date.year() } else { date.year() - 1 };
            let weekend = date.weekday().number_from_monday() >= 6;
            let holiday = is_holiday(date);

            rows.push(vec![
                sk.into(),
                date.format("%Y-%m-%d").to_string().into(),
                date.into(),
                month_seq.into(),
                week_seq.into(),
                quarter_seq.into(),
                date.year().into(),
                date.weekday().number_from_monday().into(),
                date.month().into(),
                date.day().into(),
                qoy.into(),
                fy_year.into(),
                quarter_seq.into(),
                week_seq.into(),
                date.format("%A").to_string().into(),
                format!("{}Q{}", date.year(), qoy).into(),
                yes_no(holiday).into(),
                yes_no(weekend).into(),
                yes_no(previous_holiday).into(),
                1i64.into(),
                last_day_of_month(date).into(),
                Value::from((sk > 365).then(|| sk - 365)),
                Value::from((sk > 90).then(|| sk - 90)),
                yes_no(date == as_of).into(),
                yes_no(date.iso_week() == as_of.iso_week()).into(),
                yes_no(date.year() == as_of.year() && date.month() == as_of.month()).into(),
                yes_no(date.year() == as_of.year() && qoy == quarter(as_of)).into(),
                yes_no(date.year() == as_of.year()).into(),
            ]);

            self.dates.push(DateAttrs {
                sk,
                month: date.month(),
                weekend,
                holiday,
            });
            previous_holiday = holiday;
        }
        rows
    }

    pub(super) fn customer_demographics(&mut self) -> Vec<Row> {
        const SEGMENTS: i64 = 10_000;
        let mut rows: Vec<Row> = Vec::with_capacity(SEGMENTS as usize);

        for sk in 1..=SEGMENTS {
            let gender = self.choose(&["M", "F"]);
            let marital = self.choose(&["S", "M", "W", "D"]);
            let education = self.choose(&lookups::EDUCATION);

            let factor = match education {
                "Advanced Degree" => 2.5,
                "College" => 1.8,
                "Secondary" => 1.2,
                _ => 1.0,
            };
            let purchase_estimate = (500.0 * factor * self.rng.gen_range(0.5..2.0)) as i64;
            let credit_rating = if purchase_estimate > 2000 {
                self.choose(&["Good", "High Risk", "Low Risk"])
            } else {
                self.choose(&["Good", "High Risk", "Unknown"])
            };

            let dep_count = *self.weights.dep_count.sample(&mut self.rng);
            let dep_employed = self.rng.gen_range(0..=dep_count);
            let dep_college = self.rng.gen_range(0..=dep_count / 2);

            rows.push(vec![
                sk.into(),
                gender.into(),
                marital.into(),
                education.into(),
                purchase_estimate.into(),
                credit_rating.into(),
                dep_count.into(),
                dep_employed.into(),
                dep_college.into(),
            ]);
        }
        rows
    }

    /// State from a region, chosen round-robin by `idx`
    fn region_state(&mut self, idx: usize) -> (&'static str, &'static str) {
        let (region, states) = REGIONS[idx % REGIONS.len()];
        (region, self.choose(states))
    }

    fn person_name(&mut self) -> String {
        let first = self.choose(&lookups::FIRST_NAMES);
        let last = self.choose(&lookups::LAST_NAMES);
        format!("{} {}", first, last)
    }

    /// The shared address block: street number, street name, street type,
    /// suite, city, county, state, zip, country and GMT offset
    fn address(
        &mut self,
        state: &'static str,
        street_types: &[&'static str],
        suite: Option<String>,
    ) -> Vec<Value> {
        let city = self.choose(&lookups::CITIES);
        let county_seat = self.choose(&lookups::CITIES);
        vec![
            self.rng.gen_range(1..=9999).to_string().into(),
            self.choose(&lookups::STREET_NAMES).into(),
            self.choose(street_types).into(),
            suite.into(),
            city.into(),
            format!("{} County", county_seat).into(),
            state.into(),
            self.rng.gen_range(10_000..=99_999).to_string().into(),
            lookups::COUNTRY.into(),
            lookups::gmt_offset(state).into(),
        ]
    }

    pub(super) fn customer_addresses(&mut self) -> Vec<Row> {
        let per_region = (self.config.num_customers / REGIONS.len()).max(1);
        let mut rows: Vec<Row> = Vec::with_capacity(per_region * REGIONS.len());

        for region_idx in 0..REGIONS.len() {
            for _ in 0..per_region {
                let sk = rows.len() as i64 + 1;
                let (_, state) = self.region_state(region_idx);
                let suite = self
                    .chance(0.3)
                    .then(|| format!("Suite {}", self.rng.gen_range(1..=200)));

                let mut row: Row = vec![sk.into(), format!("ADDR{:010}", sk).into()];
                row.extend(self.address(state, &lookups::STREET_TYPES, suite));
                row.push(self.choose(&lookups::LOCATION_TYPES).into());
                rows.push(row);
            }
        }
        rows
    }

    pub(super) fn warehouses(&mut self) -> Vec<Row> {
        (0..self.config.num_warehouses)
            .map(|i| {
                let sk = i as i64 + 1;
                let (region, state) = self.region_state(i);
                let suite = self
                    .chance(0.4)
                    .then(|| format!("Bldg {}", self.rng.gen_range(1..=20)));

                let mut row: Row = vec![
                    sk.into(),
                    format!("WARE{:010}", sk).into(),
                    format!("{} DC{}", region, sk).into(),
                    self.rng.gen_range(50_000..=500_000i64).into(),
                ];
                row.extend(self.address(state, &["St", "Ave", "Blvd", "Way", "Dr"], suite));
                row
            })
            .collect()
    }

    pub(super) fn stores(&mut self) -> Vec<Row> {
        self.stores.clear();
        let start = self.config.start_date;

        (0..self.config.num_stores)
            .map(|i| {
                let sk = i as i64 + 1;
                let (region, state) = self.region_state(i);
                let (store_type, sq_ft, staff) = self.choose(&lookups::STORE_TYPES);
                let floor_space = sq_ft + self.rng.gen_range(-5000..=5000);
                let tax = round4(self.rng.gen_range(0.05..0.12));
                let suite = self
                    .chance(0.2)
                    .then(|| format!("Suite {}", self.rng.gen_range(1..=50)));

                let mut row: Row = vec![
                    sk.into(),
                    format!("STORE{:010}", sk).into(),
                    start.into(),
                    Value::Null,
                    Value::Null,
                    format!("{} {} #{}", region, store_type, sk).into(),
                    (staff + self.rng.gen_range(-20..=20)).into(),
                    floor_space.into(),
                    "M-Sa 8AM-10PM Su 10-8".into(),
                    self.person_name().into(),
                    (i % 10 + 1).into(),
                    self.choose(&["Urban", "Suburban", "Rural"]).into(),
                    format!("{} Market Region", region).into(),
                    self.person_name().into(),
                    (i % 3 + 1).into(),
                    self.choose(&["North Division", "South Division", "Central Division"])
                        .into(),
                    1i64.into(),
                    lookups::COMPANY_NAME.into(),
                ];
                row.extend(self.address(state, &["St", "Ave", "Blvd", "Way"], suite));
                row.push(tax.into());

                self.stores.push(StoreAttrs {
                    sk,
                    floor_space,
                    tax,
                });
                row
            })
            .collect()
    }

    pub(super) fn items(&mut self) -> Vec<Row> {
        self.items.clear();
        let start = self.config.start_date;

        (0..self.config.num_items)
            .map(|i| {
                let sk = i as i64 + 1;
                let category = self.rng.gen_range(0..CATEGORIES.len());
                let (category_name, subcategories) = CATEGORIES[category];
                let class = self.rng.gen_range(0..subcategories.len());
                let brand = self.rng.gen_range(0..lookups::BRANDS[category].len());
                let brand_name = lookups::BRANDS[category][brand];
                let subcategory = subcategories[class];

                let (low, high) = lookups::PRICE_RANGES[category];
                let price = round2(self.rng.gen_range(low..high));
                let wholesale = round2(price * self.rng.gen_range(0.4..0.7));
                let size = if category_name == "Clothing" {
                    self.choose(&lookups::SIZES)
                } else {
                    "OS"
                };

                self.items.push(ItemAttrs {
                    sk,
                    price,
                    wholesale,
                    category,
                });

                vec![
                    sk.into(),
                    format!("ITEM{:010}", sk).into(),
                    start.into(),
                    Value::Null,
                    format!("{} {} Product {}", brand_name, subcategory, sk).into(),
                    price.into(),
                    wholesale.into(),
                    ((category * 100 + brand) as i64 + 1).into(),
                    brand_name.into(),
                    ((category * 10 + class) as i64 + 1).into(),
                    subcategory.into(),
                    (category as i64 + 1).into(),
                    category_name.into(),
                    self.rng.gen_range(1..=1000i64).into(),
                    format!("{} Manufacturing", brand_name).into(),
                    size.into(),
                    format!("Formula-{}", self.rng.gen_range(1..=100)).into(),
                    self.choose(&lookups::COLORS).into(),
                    self.choose(&lookups::UNITS).into(),
                    self.choose(&lookups::CONTAINERS).into(),
                    self.rng.gen_range(1..=100i64).into(),
                    format!("{} {}", brand_name, subcategory).into(),
                ]
            })
            .collect()
    }

    pub(super) fn customers(&mut self) -> Result<Vec<Row>, GenerateError> {
        let mut rows: Vec<Row> = Vec::with_capacity(self.config.num_customers);

        for i in 0..self.config.num_customers {
            let sk = i as i64 + 1;
            let first = self.choose(&lookups::FIRST_NAMES);
            let last = self.choose(&lookups::LAST_NAMES);
            let login_prefix: String = first.to_lowercase().chars().take(4).collect();

            rows.push(vec![
                sk.into(),
                format!("CUST{:010}", sk).into(),
                self.pick(TpcdsTable::CustomerDemographics)?.into(),
                self.pick(TpcdsTable::HouseholdDemographics)?.into(),
                self.pick(TpcdsTable::CustomerAddress)?.into(),
                self.pick(TpcdsTable::DateDim)?.into(),
                self.pick(TpcdsTable::DateDim)?.into(),
                self.choose(&lookups::SALUTATIONS).into(),
                first.into(),
                last.into(),
                self.flag().into(),
                self.rng.gen_range(1..=28i64).into(),
                self.rng.gen_range(1..=12i64).into(),
                self.rng.gen_range(1940..=2005i64).into(),
                "UNITED STATES".into(),
                format!("{}{}", login_prefix, self.rng.gen_range(1..=999)).into(),
                format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase()).into(),
                self.pick(TpcdsTable::DateDim)?.into(),
            ]);
        }
        Ok(rows)
    }

    pub(super) fn ship_modes(&mut self) -> Vec<Row> {
        lookups::SHIP_MODES
            .iter()
            .enumerate()
            .map(|(i, (code, description, carriers))| {
                let sk = i as i64 + 1;
                vec![
                    sk.into(),
                    format!("SHIP{:010}", sk).into(),
                    (*description).into(),
                    (*code).into(),
                    self.choose(carriers).into(),
                    format!("Contract-{}", sk).into(),
                ]
            })
            .collect()
    }

    /// One row per 15 minutes of the day
    pub(super) fn time_dim(&mut self) -> Vec<Row> {
        let mut rows: Vec<Row> = Vec::with_capacity(96);
        for hour in 0..24i64 {
            for minute in (0..60i64).step_by(15) {
                let sk = rows.len() as i64 + 1;
                let shift = if !(6..22).contains(&hour) { "Night" } else { "Day" };
                let sub_shift = if hour < 12 { "Early" } else { "Late" };
                let meal_time = match hour {
                    6..=9 => "Breakfast",
                    11..=13 => "Lunch",
                    17..=19 => "Dinner",
                    _ => "Off Hours",
                };

                rows.push(vec![
                    sk.into(),
                    format!("TIME{:010}", sk).into(),
                    (hour * 3600 + minute * 60).into(),
                    hour.into(),
                    minute.into(),
                    0i64.into(),
                    (if hour < 12 { "AM" } else { "PM" }).into(),
                    shift.into(),
                    sub_shift.into(),
                    meal_time.into(),
                ]);
            }
        }
        rows
    }

    pub(super) fn reasons(&mut self) -> Vec<Row> {
        lookups::REASONS
            .iter()
            .enumerate()
            .map(|(i, (description, _))| {
                let sk = i as i64 + 1;
                vec![
                    sk.into(),
                    format!("REASON{:010}", sk).into(),
                    (*description).into(),
                ]
            })
            .collect()
    }

    pub(super) fn income_bands(&mut self) -> Vec<Row> {
        lookups::INCOME_BANDS
            .iter()
            .enumerate()
            .map(|(i, (lower, upper, _))| {
                vec![(i as i64 + 1).into(), (*lower).into(), (*upper).into()]
            })
            .collect()
    }

    pub(super) fn household_demographics(&mut self) -> Vec<Row> {
        const COMBINATIONS: i64 = 7_200;
        (1..=COMBINATIONS)
            .map(|sk| {
                let income_band = *self.weights.income_band.sample(&mut self.rng);
                vec![
                    sk.into(),
                    income_band.into(),
                    self.choose(&lookups::BUY_POTENTIAL).into(),
                    self.rng.gen_range(0..=6i64).into(),
                    self.rng.gen_range(0..=4i64).into(),
                ]
            })
            .collect()
    }

    pub(super) fn web_sites(&mut self) -> Result<Vec<Row>, GenerateError> {
        let start = self.config.start_date;
        let mut rows: Vec<Row> = Vec::with_capacity(self.config.num_web_sites);

        for i in 0..self.config.num_web_sites {
            let sk = i as i64 + 1;
            let state = self.choose(&["CA", "NY", "TX", "WA"]);
            let suite = Some(format!("Suite {}", self.rng.gen_range(100..=999)));

            let mut row: Row = vec![
                sk.into(),
                format!("SITE{:010}", sk).into(),
                start.into(),
                Value::Null,
                format!("{} Online Store {}", lookups::COMPANY_NAME, sk).into(),
                self.pick(TpcdsTable::DateDim)?.into(),
                Value::Null,
                self.choose(&["Business", "Consumer", "Both"]).into(),
                self.person_name().into(),
                self.rng.gen_range(1..=10i64).into(),
                self.choose(&["National", "Regional", "Local"]).into(),
                "Online retail market".into(),
                self.person_name().into(),
                1i64.into(),
                lookups::COMPANY_NAME.into(),
            ];
            row.extend(self.address(state, &["St", "Ave", "Blvd"], suite));
            row.push(round4(self.rng.gen_range(0.05..0.10)).into());
            rows.push(row);
        }
        Ok(rows)
    }

    /// One call center per region
    pub(super) fn call_centers(&mut self) -> Result<Vec<Row>, GenerateError> {
        let start = self.config.start_date;
        let mut rows: Vec<Row> = Vec::with_capacity(REGIONS.len());

        for i in 0..REGIONS.len() {
            let sk = i as i64 + 1;
            let (region, state) = self.region_state(i);
            let suite = Some(format!("Floor {}", self.rng.gen_range(1..=10)));

            let mut row: Row = vec![
                sk.into(),
                format!("CC{:010}", sk).into(),
                start.into(),
                Value::Null,
                Value::Null,
                self.pick(TpcdsTable::DateDim)?.into(),
                format!("{} Customer Service Center", region).into(),
                "large".into(),
                self.rng.gen_range(50..=200i64).into(),
                self.rng.gen_range(15_000..=50_000i64).into(),
                "24x7".into(),
                self.person_name().into(),
                sk.into(),
                "regional".into(),
                format!("{} customer service market", region).into(),
                self.person_name().into(),
                1i64.into(),
                "Customer Service Division".into(),
                1i64.into(),
                lookups::COMPANY_NAME.into(),
            ];
            row.extend(self.address(state, &["St", "Ave", "Blvd"], suite));
            row.push(round4(self.rng.gen_range(0.05..0.12)).into());
            rows.push(row);
        }
        Ok(rows)
    }

    /// One promotion per campaign type for every year in the date range
    pub(super) fn promotions(&mut self) -> Result<Vec<Row>, GenerateError> {
        let first_year = self.config.start_date.year();
        let last_year = self.config.end_date.year();
        let mut rows: Vec<Row> = Vec::new();

        for year in first_year..=last_year {
            for (name, start_month, end_month, categories) in lookups::PROMOTIONS {
                let sk = rows.len() as i64 + 1;
                let end_day = if start_month == end_month { 28 } else { 15 };
                let start_date = NaiveDate::from_ymd_opt(year, start_month, 1);
                let end_date = NaiveDate::from_ymd_opt(year, end_month, end_day);
                let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
                    continue;
                };

                rows.push(vec![
                    sk.into(),
                    format!("PROMO{:010}", sk).into(),
                    self.date_key(start_date)?.into(),
                    self.date_key(end_date)?.into(),
                    Value::Null,
                    round2(self.rng.gen_range(1000.0..50_000.0)).into(),
                    self.rng.gen_range(5..=25i64).into(),
                    format!("{} {}", year, name).into(),
                    self.flag().into(),
                    "Y".into(),
                    self.flag().into(),
                    self.flag().into(),
                    self.flag().into(),
                    self.flag().into(),
                    self.flag().into(),
                    self.flag().into(),
                    format!("{} campaign for {}", name, categories.join(", ")).into(),
                    self.choose(&["attract", "retain", "upgrade"]).into(),
                    "Y".into(),
                ]);
            }
        }
        Ok(rows)
    }

    /// One page per product subcategory
    pub(super) fn web_pages(&mut self) -> Result<Vec<Row>, GenerateError> {
        let start = self.config.start_date;
        let mut rows: Vec<Row> = Vec::new();

        for (category, subcategories) in CATEGORIES {
            for subcategory in subcategories {
                let sk = rows.len() as i64 + 1;
                rows.push(vec![
                    sk.into(),
                    format!("PAGE{:010}", sk).into(),
                    start.into(),
                    Value::Null,
                    self.pick(TpcdsTable::DateDim)?.into(),
                    self.pick(TpcdsTable::DateDim)?.into(),
                    self.flag().into(),
                    Value::Null,
                    format!(
                        "http://www.retailcorp.com/{}/{}.html",
                        lookups::slug(category),
                        lookups::slug(subcategory)
                    )
                    .into(),
                    "category".into(),
                    self.rng.gen_range(1000..=5000i64).into(),
                    self.rng.gen_range(5..=25i64).into(),
                    self.rng.gen_range(3..=15i64).into(),
                    self.rng.gen_range(1..=5i64).into(),
                ]);
            }
        }
        Ok(rows)
    }

    /// Two seasonal catalog pages per category
    pub(super) fn catalog_pages(&mut self) -> Result<Vec<Row>, GenerateError> {
        let mut rows: Vec<Row> = Vec::new();

        for (category, _) in CATEGORIES {
            for _ in 0..2 {
                let sk = rows.len() as i64 + 1;
                let a = self.pick(TpcdsTable::DateDim)?;
                let b = self.pick(TpcdsTable::DateDim)?;
                rows.push(vec![
                    sk.into(),
                    format!("CATPG{:010}", sk).into(),
                    a.min(b).into(),
                    a.max(b).into(),
                    category.into(),
                    self.rng.gen_range(1..=100i64).into(),
                    self.rng.gen_range(1..=200i64).into(),
                    format!("{} catalog page", category).into(),
                    "seasonal".into(),
                ]);
            }
        }
        Ok(rows)
    }

    /// Stock levels for sampled dates and items in every warehouse
    pub(super) fn inventory(&mut self) -> Result<Vec<Row>, GenerateError> {
        const MAX_ROWS: usize = 25_000;

        let dates: Vec<i64> = self
            .dates
            .choose_multiple(&mut self.rng, 10)
            .map(|d| d.sk)
            .collect();
        let items: Vec<ItemAttrs> = self
            .items
            .choose_multiple(&mut self.rng, 500)
            .copied()
            .collect();
        let warehouses = self
            .key_pool(TpcdsTable::Warehouse)
            .map(<[i64]>::to_vec)
            .unwrap_or_default();
        if dates.is_empty() || items.is_empty() || warehouses.is_empty() {
            return Err(GenerateError::EmptyPool(TpcdsTable::Inventory.to_string()));
        }

        let mut rows: Vec<Row> = Vec::new();
        'dates: for date_sk in &dates {
            for warehouse_sk in &warehouses {
                for item in &items {
                    if rows.len() >= MAX_ROWS {
                        break 'dates;
                    }
                    let base = lookups::INVENTORY_BASE[item.category];
                    rows.push(vec![
                        (*date_sk).into(),
                        item.sk.into(),
                        (*warehouse_sk).into(),
                        self.rng.gen_range(0..=base * 2).into(),
                    ]);
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::super::GeneratorConfig;
    use super::*;

    fn generator() -> SyntheticGenerator {
        let config = GeneratorConfig::test_mode()
            .with_seed(Some(3))
            .with_as_of(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap());
        SyntheticGenerator::new(config).unwrap()
    }

    fn column(table: TpcdsTable, row: &Row, name: &str) -> Value {
        row[table.column_index(name).unwrap()].clone()
    }

    #[test]
    fn test_holidays() {
        let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
        assert!(is_holiday(d(1, 1)));
        assert!(is_holiday(d(7, 4)));
        assert!(is_holiday(d(12, 25)));
        assert!(is_holiday(d(11, 23)));
        assert!(!is_holiday(d(11, 24)));
        assert!(!is_holiday(d(3, 15)));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
        assert_eq!(last_day_of_month(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()), 31);
    }

    #[test]
    fn test_date_dim_spans_window() {
        let mut generator = generator();
        let rows = generator.generate(TpcdsTable::DateDim).unwrap().to_vec();
        let t = TpcdsTable::DateDim;
        assert_eq!(rows.len(), 7);
        assert_eq!(
            column(t, &rows[0], "d_date"),
            Value::Date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        );
        assert_eq!(
            column(t, &rows[6], "d_date"),
            Value::Date(NaiveDate::from_ymd_opt(2023, 1, 7).unwrap())
        );
        assert_eq!(column(t, &rows[0], "d_holiday"), Value::from("Y"));
        assert_eq!(column(t, &rows[1], "d_following_holiday"), Value::from("Y"));
        assert_eq!(column(t, &rows[0], "d_weekend"), Value::from("Y"));
        assert_eq!(column(t, &rows[0], "d_fy_year"), Value::Int(2022));
        assert_eq!(column(t, &rows[0], "d_same_day_ly"), Value::Null);
        assert_eq!(column(t, &rows[3], "d_current_day"), Value::from("Y"));
        assert_eq!(column(t, &rows[2], "d_current_day"), Value::from("N"));
        assert_eq!(column(t, &rows[6], "d_current_year"), Value::from("Y"));
        assert_eq!(generator.key_pool(t).unwrap(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_fixed_size_dimensions() {
        let mut generator = generator();
        assert_eq!(generator.generate(TpcdsTable::TimeDim).unwrap().len(), 96);
        assert_eq!(generator.generate(TpcdsTable::ShipMode).unwrap().len(), 5);
        assert_eq!(generator.generate(TpcdsTable::Reason).unwrap().len(), 12);
        assert_eq!(generator.generate(TpcdsTable::IncomeBand).unwrap().len(), 7);
        assert_eq!(generator.generate(TpcdsTable::CallCenter).unwrap().len(), 4);
        assert_eq!(generator.generate(TpcdsTable::WebPage).unwrap().len(), 30);
        assert_eq!(generator.generate(TpcdsTable::CatalogPage).unwrap().len(), 12);
        assert_eq!(
            generator
                .generate(TpcdsTable::HouseholdDemographics)
                .unwrap()
                .len(),
            7_200
        );
    }

    #[test]
    fn test_addresses_cover_every_region() {
        let mut generator = generator();
        let rows = generator.generate(TpcdsTable::CustomerAddress).unwrap();
        assert_eq!(rows.len(), 4);
        let offset_idx = TpcdsTable::CustomerAddress
            .column_index("ca_gmt_offset")
            .unwrap();
        for row in rows {
            let offset = row[offset_idx].as_f64().unwrap();
            assert!((-8.0..=-5.0).contains(&offset));
        }
    }

    #[test]
    fn test_item_pricing() {
        let mut generator = generator();
        let t = TpcdsTable::Item;
        for row in generator.generate(t).unwrap() {
            let price = column(t, row, "i_current_price").as_f64().unwrap();
            let wholesale = column(t, row, "i_wholesale_cost").as_f64().unwrap();
            assert!(wholesale <= price * 0.7 + 0.01);
            assert!(wholesale >= price * 0.4 - 0.01);
        }
    }

    #[test]
    fn test_promotions_clamp_to_window() {
        let mut generator = generator();
        let t = TpcdsTable::Promotion;
        let rows = generator.generate(t).unwrap();
        assert_eq!(rows.len(), 6);
        for row in rows {
            let start = column(t, row, "p_start_date_sk").as_i64().unwrap();
            let end = column(t, row, "p_end_date_sk").as_i64().unwrap();
            assert!((1..=7).contains(&start));
            assert!((1..=7).contains(&end));
            assert!(start <= end);
        }
    }

    #[test]
    fn test_inventory_is_unique_per_key() {
        let mut generator = generator();
        let rows = generator.generate(TpcdsTable::Inventory).unwrap();
        assert_eq!(rows.len(), 7 * 3);
        let mut keys: Vec<(Value, Value, Value)> = rows
            .iter()
            .map(|r| (r[0].clone(), r[1].clone(), r[2].clone()))
            .collect();
        keys.dedup();
        assert_eq!(keys.len(), rows.len());
    }
}
