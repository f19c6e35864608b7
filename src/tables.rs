//! TPC-DS table catalog
//!
//! The fixed set of tables this crate generates, creates, loads and copies,
//! with column layouts in flat-file order, primary keys and the surrogate-key
//! references between them. Drop and create order are derived from the
//! reference graph.

use petgraph::Graph;
use petgraph::algo::toposort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Portable column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Decimal(u8, u8),
    Char(u16),
    Varchar(u16),
    Date,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::Decimal(p, s) => write!(f, "DECIMAL({},{})", p, s),
            SqlType::Char(n) => write!(f, "CHAR({})", n),
            SqlType::Varchar(n) => write!(f, "VARCHAR({})", n),
            SqlType::Date => write!(f, "DATE"),
        }
    }
}

/// A column in flat-file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: SqlType,
}

/// A surrogate-key reference from a column to a dimension table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: TpcdsTable,
}

const fn int(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type: SqlType::Integer,
    }
}

const fn dec(name: &'static str, precision: u8, scale: u8) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type: SqlType::Decimal(precision, scale),
    }
}

const fn money(name: &'static str) -> ColumnSpec {
    dec(name, 7, 2)
}

const fn chr(name: &'static str, len: u16) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type: SqlType::Char(len),
    }
}

const fn var(name: &'static str, len: u16) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type: SqlType::Varchar(len),
    }
}

const fn date(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type: SqlType::Date,
    }
}

const fn fk(column: &'static str, references: TpcdsTable) -> ForeignKey {
    ForeignKey { column, references }
}

/// Tables known to this crate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TpcdsTable {
    CallCenter,
    CatalogPage,
    CatalogReturns,
    CatalogSales,
    Customer,
    CustomerAddress,
    CustomerDemographics,
    DateDim,
    HouseholdDemographics,
    IncomeBand,
    Inventory,
    Item,
    Promotion,
    Reason,
    ShipMode,
    Store,
    StoreReturns,
    StoreSales,
    TimeDim,
    Warehouse,
    WebPage,
    WebReturns,
    WebSales,
    WebSite,
    DbgenVersion,
}

impl TpcdsTable {
    /// Tables that carry data files, in discovery order
    pub const DATA_TABLES: [TpcdsTable; 24] = [
        TpcdsTable::CallCenter,
        TpcdsTable::CatalogPage,
        TpcdsTable::CatalogReturns,
        TpcdsTable::CatalogSales,
        TpcdsTable::Customer,
        TpcdsTable::CustomerAddress,
        TpcdsTable::CustomerDemographics,
        TpcdsTable::DateDim,
        TpcdsTable::HouseholdDemographics,
        TpcdsTable::IncomeBand,
        TpcdsTable::Inventory,
        TpcdsTable::Item,
        TpcdsTable::Promotion,
        TpcdsTable::Reason,
        TpcdsTable::ShipMode,
        TpcdsTable::Store,
        TpcdsTable::StoreReturns,
        TpcdsTable::StoreSales,
        TpcdsTable::TimeDim,
        TpcdsTable::Warehouse,
        TpcdsTable::WebPage,
        TpcdsTable::WebReturns,
        TpcdsTable::WebSales,
        TpcdsTable::WebSite,
    ];

    /// Every known table, including the generator version table
    pub const KNOWN: [TpcdsTable; 25] = [
        TpcdsTable::CallCenter,
        TpcdsTable::CatalogPage,
        TpcdsTable::CatalogReturns,
        TpcdsTable::CatalogSales,
        TpcdsTable::Customer,
        TpcdsTable::CustomerAddress,
        TpcdsTable::CustomerDemographics,
        TpcdsTable::DateDim,
        TpcdsTable::HouseholdDemographics,
        TpcdsTable::IncomeBand,
        TpcdsTable::Inventory,
        TpcdsTable::Item,
        TpcdsTable::Promotion,
        TpcdsTable::Reason,
        TpcdsTable::ShipMode,
        TpcdsTable::Store,
        TpcdsTable::StoreReturns,
        TpcdsTable::StoreSales,
        TpcdsTable::TimeDim,
        TpcdsTable::Warehouse,
        TpcdsTable::WebPage,
        TpcdsTable::WebReturns,
        TpcdsTable::WebSales,
        TpcdsTable::WebSite,
        TpcdsTable::DbgenVersion,
    ];

    /// Lowercase table name
    pub fn name(&self) -> &'static str {
        match self {
            TpcdsTable::CallCenter => "call_center",
            TpcdsTable::CatalogPage => "catalog_page",
            TpcdsTable::CatalogReturns => "catalog_returns",
            TpcdsTable::CatalogSales => "catalog_sales",
            TpcdsTable::Customer => "customer",
            TpcdsTable::CustomerAddress => "customer_address",
            TpcdsTable::CustomerDemographics => "customer_demographics",
            TpcdsTable::DateDim => "date_dim",
            TpcdsTable::HouseholdDemographics => "household_demographics",
            TpcdsTable::IncomeBand => "income_band",
            TpcdsTable::Inventory => "inventory",
            TpcdsTable::Item => "item",
            TpcdsTable::Promotion => "promotion",
            TpcdsTable::Reason => "reason",
            TpcdsTable::ShipMode => "ship_mode",
            TpcdsTable::Store => "store",
            TpcdsTable::StoreReturns => "store_returns",
            TpcdsTable::StoreSales => "store_sales",
            TpcdsTable::TimeDim => "time_dim",
            TpcdsTable::Warehouse => "warehouse",
            TpcdsTable::WebPage => "web_page",
            TpcdsTable::WebReturns => "web_returns",
            TpcdsTable::WebSales => "web_sales",
            TpcdsTable::WebSite => "web_site",
            TpcdsTable::DbgenVersion => "dbgen_version",
        }
    }

    /// Uppercase table name, as used in DDL scripts
    pub fn upper_name(&self) -> String {
        self.name().to_uppercase()
    }

    /// Name of the flat file holding this table's rows
    pub fn file_name(&self) -> String {
        format!("{}.dat", self.name())
    }

    /// True for the sales and returns tables
    pub fn is_fact(&self) -> bool {
        matches!(
            self,
            TpcdsTable::StoreSales
                | TpcdsTable::WebSales
                | TpcdsTable::CatalogSales
                | TpcdsTable::StoreReturns
                | TpcdsTable::WebReturns
                | TpcdsTable::CatalogReturns
                | TpcdsTable::Inventory
        )
    }

    /// Columns in flat-file order
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            TpcdsTable::CallCenter => CALL_CENTER,
            TpcdsTable::CatalogPage => CATALOG_PAGE,
            TpcdsTable::CatalogReturns => CATALOG_RETURNS,
            TpcdsTable::CatalogSales => CATALOG_SALES,
            TpcdsTable::Customer => CUSTOMER,
            TpcdsTable::CustomerAddress => CUSTOMER_ADDRESS,
            TpcdsTable::CustomerDemographics => CUSTOMER_DEMOGRAPHICS,
            TpcdsTable::DateDim => DATE_DIM,
            TpcdsTable::HouseholdDemographics => HOUSEHOLD_DEMOGRAPHICS,
            TpcdsTable::IncomeBand => INCOME_BAND,
            TpcdsTable::Inventory => INVENTORY,
            TpcdsTable::Item => ITEM,
            TpcdsTable::Promotion => PROMOTION,
            TpcdsTable::Reason => REASON,
            TpcdsTable::ShipMode => SHIP_MODE,
            TpcdsTable::Store => STORE,
            TpcdsTable::StoreReturns => STORE_RETURNS,
            TpcdsTable::StoreSales => STORE_SALES,
            TpcdsTable::TimeDim => TIME_DIM,
            TpcdsTable::Warehouse => WAREHOUSE,
            TpcdsTable::WebPage => WEB_PAGE,
            TpcdsTable::WebReturns => WEB_RETURNS,
            TpcdsTable::WebSales => WEB_SALES,
            TpcdsTable::WebSite => WEB_SITE,
            TpcdsTable::DbgenVersion => DBGEN_VERSION,
        }
    }

    /// Position of a column in flat-file order
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns()
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(column))
    }

    /// Primary key columns
    pub fn primary_key(&self) -> &'static [&'static str] {
        match self {
            TpcdsTable::Inventory => &["inv_date_sk", "inv_item_sk", "inv_warehouse_sk"],
            TpcdsTable::StoreSales => &["ss_item_sk", "ss_ticket_number"],
            TpcdsTable::WebSales => &["ws_item_sk", "ws_order_number"],
            TpcdsTable::CatalogSales => &["cs_item_sk", "cs_order_number"],
            TpcdsTable::StoreReturns => &["sr_item_sk", "sr_ticket_number"],
            TpcdsTable::WebReturns => &["wr_item_sk", "wr_order_number"],
            TpcdsTable::CatalogReturns => &["cr_item_sk", "cr_order_number"],
            TpcdsTable::DbgenVersion => &[],
            other => std::slice::from_ref(&other.columns()[0].name),
        }
    }

    /// Surrogate-key references to dimension tables
    pub fn foreign_keys(&self) -> &'static [ForeignKey] {
        match self {
            TpcdsTable::Customer => CUSTOMER_FKS,
            TpcdsTable::HouseholdDemographics => HOUSEHOLD_DEMOGRAPHICS_FKS,
            TpcdsTable::Store => STORE_FKS,
            TpcdsTable::WebSite => WEB_SITE_FKS,
            TpcdsTable::CallCenter => CALL_CENTER_FKS,
            TpcdsTable::Promotion => PROMOTION_FKS,
            TpcdsTable::WebPage => WEB_PAGE_FKS,
            TpcdsTable::CatalogPage => CATALOG_PAGE_FKS,
            TpcdsTable::Inventory => INVENTORY_FKS,
            TpcdsTable::StoreSales => STORE_SALES_FKS,
            TpcdsTable::WebSales => WEB_SALES_FKS,
            TpcdsTable::CatalogSales => CATALOG_SALES_FKS,
            TpcdsTable::StoreReturns => STORE_RETURNS_FKS,
            TpcdsTable::WebReturns => WEB_RETURNS_FKS,
            TpcdsTable::CatalogReturns => CATALOG_RETURNS_FKS,
            _ => &[],
        }
    }

    /// The sales table a returns table samples from
    pub fn derived_from(&self) -> Option<TpcdsTable> {
        match self {
            TpcdsTable::StoreReturns => Some(TpcdsTable::StoreSales),
            TpcdsTable::WebReturns => Some(TpcdsTable::WebSales),
            TpcdsTable::CatalogReturns => Some(TpcdsTable::CatalogSales),
            _ => None,
        }
    }

    /// Tables this table depends on, without duplicates
    pub fn dependencies(&self) -> Vec<TpcdsTable> {
        let mut deps: Vec<TpcdsTable> = Vec::new();
        let referenced = self
            .foreign_keys()
            .iter()
            .map(|f| f.references)
            .chain(self.derived_from());
        for table in referenced {
            if table != *self && !deps.contains(&table) {
                deps.push(table);
            }
        }
        deps
    }

    /// Order in which tables can be dropped: dependents before their dimensions
    pub fn drop_order() -> Vec<TpcdsTable> {
        let mut graph: Graph<TpcdsTable, ()> = Graph::new();
        let mut nodes = HashMap::new();
        for table in TpcdsTable::KNOWN {
            nodes.insert(table, graph.add_node(table));
        }
        for table in TpcdsTable::KNOWN {
            for dep in table.dependencies() {
                graph.add_edge(nodes[&table], nodes[&dep], ());
            }
        }

        match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(|idx| graph[idx]).collect(),
            Err(cycle) => {
                tracing::warn!(
                    "Table reference cycle at {}, using catalog order",
                    graph[cycle.node_id()]
                );
                TpcdsTable::KNOWN.to_vec()
            }
        }
    }

    /// Order in which tables can be created: dimensions before dependents
    pub fn create_order() -> Vec<TpcdsTable> {
        let mut order = Self::drop_order();
        order.reverse();
        order
    }
}

impl fmt::Display for TpcdsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TpcdsTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_end_matches(".dat");
        TpcdsTable::KNOWN
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown table: {}", s))
    }
}

const DATE_DIM: &[ColumnSpec] = &[
    int("d_date_sk"),
    chr("d_date_id", 16),
    date("d_date"),
    int("d_month_seq"),
    int("d_week_seq"),
    int("d_quarter_seq"),
    int("d_year"),
    int("d_dow"),
    int("d_moy"),
    int("d_dom"),
    int("d_qoy"),
    int("d_fy_year"),
    int("d_fy_quarter_seq"),
    int("d_fy_week_seq"),
    var("d_day_name", 9),
    var("d_quarter_name", 6),
    chr("d_holiday", 1),
    chr("d_weekend", 1),
    chr("d_following_holiday", 1),
    int("d_first_dom"),
    int("d_last_dom"),
    int("d_same_day_ly"),
    int("d_same_day_lq"),
    chr("d_current_day", 1),
    chr("d_current_week", 1),
    chr("d_current_month", 1),
    chr("d_current_quarter", 1),
    chr("d_current_year", 1),
];

const CUSTOMER_DEMOGRAPHICS: &[ColumnSpec] = &[
    int("cd_demo_sk"),
    chr("cd_gender", 1),
    chr("cd_marital_status", 1),
    var("cd_education_status", 20),
    int("cd_purchase_estimate"),
    var("cd_credit_rating", 10),
    int("cd_dep_count"),
    int("cd_dep_employed_count"),
    int("cd_dep_college_count"),
];

const CUSTOMER_ADDRESS: &[ColumnSpec] = &[
    int("ca_address_sk"),
    chr("ca_address_id", 16),
    var("ca_street_number", 10),
    var("ca_street_name", 60),
    var("ca_street_type", 15),
    var("ca_suite_number", 10),
    var("ca_city", 60),
    var("ca_county", 30),
    chr("ca_state", 2),
    var("ca_zip", 10),
    var("ca_country", 20),
    dec("ca_gmt_offset", 5, 2),
    var("ca_location_type", 20),
];

const WAREHOUSE: &[ColumnSpec] = &[
    int("w_warehouse_sk"),
    chr("w_warehouse_id", 16),
    var("w_warehouse_name", 20),
    int("w_warehouse_sq_ft"),
    var("w_street_number", 10),
    var("w_street_name", 60),
    var("w_street_type", 15),
    var("w_suite_number", 10),
    var("w_city", 60),
    var("w_county", 30),
    chr("w_state", 2),
    var("w_zip", 10),
    var("w_country", 20),
    dec("w_gmt_offset", 5, 2),
];

const STORE: &[ColumnSpec] = &[
    int("s_store_sk"),
    chr("s_store_id", 16),
    date("s_rec_start_date"),
    date("s_rec_end_date"),
    int("s_closed_date_sk"),
    var("s_store_name", 50),
    int("s_number_employees"),
    int("s_floor_space"),
    var("s_hours", 20),
    var("s_manager", 40),
    int("s_market_id"),
    var("s_geography_class", 100),
    var("s_market_desc", 100),
    var("s_market_manager", 40),
    int("s_division_id"),
    var("s_division_name", 50),
    int("s_company_id"),
    var("s_company_name", 50),
    var("s_street_number", 10),
    var("s_street_name", 60),
    var("s_street_type", 15),
    var("s_suite_number", 10),
    var("s_city", 60),
    var("s_county", 30),
    chr("s_state", 2),
    var("s_zip", 10),
    var("s_country", 20),
    dec("s_gmt_offset", 5, 2),
    dec("s_tax_precentage", 5, 4),
];

const ITEM: &[ColumnSpec] = &[
    int("i_item_sk"),
    chr("i_item_id", 16),
    date("i_rec_start_date"),
    date("i_rec_end_date"),
    var("i_item_desc", 200),
    money("i_current_price"),
    money("i_wholesale_cost"),
    int("i_brand_id"),
    var("i_brand", 50),
    int("i_class_id"),
    var("i_class", 50),
    int("i_category_id"),
    var("i_category", 50),
    int("i_manufact_id"),
    var("i_manufact", 50),
    var("i_size", 20),
    var("i_formulation", 20),
    var("i_color", 20),
    var("i_units", 10),
    var("i_container", 10),
    int("i_manager_id"),
    var("i_product_name", 50),
];

const CUSTOMER: &[ColumnSpec] = &[
    int("c_customer_sk"),
    chr("c_customer_id", 16),
    int("c_current_cdemo_sk"),
    int("c_current_hdemo_sk"),
    int("c_current_addr_sk"),
    int("c_first_shipto_date_sk"),
    int("c_first_sales_date_sk"),
    var("c_salutation", 10),
    var("c_first_name", 20),
    var("c_last_name", 30),
    chr("c_preferred_cust_flag", 1),
    int("c_birth_day"),
    int("c_birth_month"),
    int("c_birth_year"),
    var("c_birth_country", 20),
    var("c_login", 13),
    var("c_email_address", 50),
    int("c_last_review_date_sk"),
];

const SHIP_MODE: &[ColumnSpec] = &[
    int("sm_ship_mode_sk"),
    chr("sm_ship_mode_id", 16),
    var("sm_type", 30),
    var("sm_code", 10),
    var("sm_carrier", 20),
    var("sm_contract", 20),
];

const TIME_DIM: &[ColumnSpec] = &[
    int("t_time_sk"),
    chr("t_time_id", 16),
    int("t_time"),
    int("t_hour"),
    int("t_minute"),
    int("t_second"),
    chr("t_am_pm", 2),
    var("t_shift", 20),
    var("t_sub_shift", 20),
    var("t_meal_time", 20),
];

const REASON: &[ColumnSpec] = &[
    int("r_reason_sk"),
    chr("r_reason_id", 16),
    var("r_reason_desc", 100),
];

const INCOME_BAND: &[ColumnSpec] = &[
    int("ib_income_band_sk"),
    int("ib_lower_bound"),
    int("ib_upper_bound"),
];

const HOUSEHOLD_DEMOGRAPHICS: &[ColumnSpec] = &[
    int("hd_demo_sk"),
    int("hd_income_band_sk"),
    var("hd_buy_potential", 15),
    int("hd_dep_count"),
    int("hd_vehicle_count"),
];

const WEB_SITE: &[ColumnSpec] = &[
    int("web_site_sk"),
    chr("web_site_id", 16),
    date("web_rec_start_date"),
    date("web_rec_end_date"),
    var("web_name", 50),
    int("web_open_date_sk"),
    int("web_close_date_sk"),
    var("web_class", 50),
    var("web_manager", 40),
    int("web_mkt_id"),
    var("web_mkt_class", 50),
    var("web_mkt_desc", 100),
    var("web_market_manager", 40),
    int("web_company_id"),
    var("web_company_name", 50),
    var("web_street_number", 10),
    var("web_street_name", 60),
    var("web_street_type", 15),
    var("web_suite_number", 10),
    var("web_city", 60),
    var("web_county", 30),
    chr("web_state", 2),
    var("web_zip", 10),
    var("web_country", 20),
    dec("web_gmt_offset", 5, 2),
    dec("web_tax_percentage", 5, 4),
];

const CALL_CENTER: &[ColumnSpec] = &[
    int("cc_call_center_sk"),
    chr("cc_call_center_id", 16),
    date("cc_rec_start_date"),
    date("cc_rec_end_date"),
    int("cc_closed_date_sk"),
    int("cc_open_date_sk"),
    var("cc_name", 50),
    var("cc_class", 50),
    int("cc_employees"),
    int("cc_sq_ft"),
    var("cc_hours", 20),
    var("cc_manager", 40),
    int("cc_mkt_id"),
    var("cc_mkt_class", 50),
    var("cc_mkt_desc", 100),
    var("cc_market_manager", 40),
    int("cc_division"),
    var("cc_division_name", 50),
    int("cc_company"),
    var("cc_company_name", 50),
    var("cc_street_number", 10),
    var("cc_street_name", 60),
    var("cc_street_type", 15),
    var("cc_suite_number", 10),
    var("cc_city", 60),
    var("cc_county", 30),
    chr("cc_state", 2),
    var("cc_zip", 10),
    var("cc_country", 20),
    dec("cc_gmt_offset", 5, 2),
    dec("cc_tax_percentage", 5, 4),
];

const PROMOTION: &[ColumnSpec] = &[
    int("p_promo_sk"),
    chr("p_promo_id", 16),
    int("p_start_date_sk"),
    int("p_end_date_sk"),
    int("p_item_sk"),
    dec("p_cost", 15, 2),
    int("p_response_target"),
    var("p_promo_name", 50),
    chr("p_channel_dmail", 1),
    chr("p_channel_email", 1),
    chr("p_channel_catalog", 1),
    chr("p_channel_tv", 1),
    chr("p_channel_radio", 1),
    chr("p_channel_press", 1),
    chr("p_channel_event", 1),
    chr("p_channel_demo", 1),
    var("p_channel_details", 100),
    var("p_purpose", 15),
    chr("p_discount_active", 1),
];

const INVENTORY: &[ColumnSpec] = &[
    int("inv_date_sk"),
    int("inv_item_sk"),
    int("inv_warehouse_sk"),
    int("inv_quantity_on_hand"),
];

const WEB_PAGE: &[ColumnSpec] = &[
    int("wp_web_page_sk"),
    chr("wp_web_page_id", 16),
    date("wp_rec_start_date"),
    date("wp_rec_end_date"),
    int("wp_creation_date_sk"),
    int("wp_access_date_sk"),
    chr("wp_autogen_flag", 1),
    int("wp_customer_sk"),
    var("wp_url", 100),
    var("wp_type", 50),
    int("wp_char_count"),
    int("wp_link_count"),
    int("wp_image_count"),
    int("wp_max_ad_count"),
];

const CATALOG_PAGE: &[ColumnSpec] = &[
    int("cp_catalog_page_sk"),
    chr("cp_catalog_page_id", 16),
    int("cp_start_date_sk"),
    int("cp_end_date_sk"),
    var("cp_department", 50),
    int("cp_catalog_number"),
    int("cp_catalog_page_number"),
    var("cp_description", 100),
    var("cp_type", 100),
];

const STORE_SALES: &[ColumnSpec] = &[
    int("ss_sold_date_sk"),
    int("ss_sold_time_sk"),
    int("ss_item_sk"),
    int("ss_customer_sk"),
    int("ss_cdemo_sk"),
    int("ss_hdemo_sk"),
    int("ss_addr_sk"),
    int("ss_store_sk"),
    int("ss_promo_sk"),
    int("ss_ticket_number"),
    int("ss_quantity"),
    money("ss_wholesale_cost"),
    money("ss_list_price"),
    money("ss_sales_price"),
    money("ss_ext_discount_amt"),
    money("ss_ext_sales_price"),
    money("ss_ext_wholesale_cost"),
    money("ss_ext_list_price"),
    money("ss_ext_tax"),
    money("ss_coupon_amt"),
    money("ss_net_paid"),
    money("ss_net_paid_inc_tax"),
    money("ss_net_profit"),
];

const WEB_SALES: &[ColumnSpec] = &[
    int("ws_sold_date_sk"),
    int("ws_sold_time_sk"),
    int("ws_ship_date_sk"),
    int("ws_item_sk"),
    int("ws_bill_customer_sk"),
    int("ws_bill_cdemo_sk"),
    int("ws_bill_hdemo_sk"),
    int("ws_bill_addr_sk"),
    int("ws_ship_customer_sk"),
    int("ws_ship_cdemo_sk"),
    int("ws_ship_hdemo_sk"),
    int("ws_ship_addr_sk"),
    int("ws_web_page_sk"),
    int("ws_web_site_sk"),
    int("ws_ship_mode_sk"),
    int("ws_warehouse_sk"),
    int("ws_promo_sk"),
    int("ws_order_number"),
    int("ws_quantity"),
    money("ws_wholesale_cost"),
    money("ws_list_price"),
    money("ws_sales_price"),
    money("ws_ext_discount_amt"),
    money("ws_ext_sales_price"),
    money("ws_ext_wholesale_cost"),
    money("ws_ext_list_price"),
    money("ws_ext_tax"),
    money("ws_coupon_amt"),
    money("ws_ext_ship_cost"),
    money("ws_net_paid"),
    money("ws_net_paid_inc_tax"),
    money("ws_net_paid_inc_ship"),
    money("ws_net_paid_inc_ship_tax"),
    money("ws_net_profit"),
];

const CATALOG_SALES: &[ColumnSpec] = &[
    int("cs_sold_date_sk"),
    int("cs_sold_time_sk"),
    int("cs_ship_date_sk"),
    int("cs_bill_customer_sk"),
    int("cs_bill_cdemo_sk"),
    int("cs_bill_hdemo_sk"),
    int("cs_bill_addr_sk"),
    int("cs_ship_customer_sk"),
    int("cs_ship_cdemo_sk"),
    int("cs_ship_hdemo_sk"),
    int("cs_ship_addr_sk"),
    int("cs_call_center_sk"),
    int("cs_catalog_page_sk"),
    int("cs_ship_mode_sk"),
    int("cs_warehouse_sk"),
    int("cs_item_sk"),
    int("cs_promo_sk"),
    int("cs_order_number"),
    int("cs_quantity"),
    money("cs_wholesale_cost"),
    money("cs_list_price"),
    money("cs_sales_price"),
    money("cs_ext_discount_amt"),
    money("cs_ext_sales_price"),
    money("cs_ext_wholesale_cost"),
    money("cs_ext_list_price"),
    money("cs_ext_tax"),
    money("cs_coupon_amt"),
    money("cs_ext_ship_cost"),
    money("cs_net_paid"),
    money("cs_net_paid_inc_tax"),
    money("cs_net_paid_inc_ship"),
    money("cs_net_paid_inc_ship_tax"),
    money("cs_net_profit"),
];

const STORE_RETURNS: &[ColumnSpec] = &[
    int("sr_returned_date_sk"),
    int("sr_return_time_sk"),
    int("sr_item_sk"),
    int("sr_customer_sk"),
    int("sr_cdemo_sk"),
    int("sr_hdemo_sk"),
    int("sr_addr_sk"),
    int("sr_store_sk"),
    int("sr_reason_sk"),
    int("sr_ticket_number"),
    int("sr_return_quantity"),
    money("sr_return_amt"),
    money("sr_return_tax"),
    money("sr_return_amt_inc_tax"),
    money("sr_fee"),
    money("sr_return_ship_cost"),
    money("sr_refunded_cash"),
    money("sr_reversed_charge"),
    money("sr_store_credit"),
    money("sr_net_loss"),
];

const WEB_RETURNS: &[ColumnSpec] = &[
    int("wr_returned_date_sk"),
    int("wr_returned_time_sk"),
    int("wr_item_sk"),
    int("wr_refunded_customer_sk"),
    int("wr_refunded_cdemo_sk"),
    int("wr_refunded_hdemo_sk"),
    int("wr_refunded_addr_sk"),
    int("wr_returning_customer_sk"),
    int("wr_returning_cdemo_sk"),
    int("wr_returning_hdemo_sk"),
    int("wr_returning_addr_sk"),
    int("wr_web_page_sk"),
    int("wr_reason_sk"),
    int("wr_order_number"),
    int("wr_return_quantity"),
    money("wr_return_amt"),
    money("wr_return_tax"),
    money("wr_return_amt_inc_tax"),
    money("wr_fee"),
    money("wr_return_ship_cost"),
    money("wr_refunded_cash"),
    money("wr_reversed_charge"),
    money("wr_account_credit"),
    money("wr_net_loss"),
];

const CATALOG_RETURNS: &[ColumnSpec] = &[
    int("cr_returned_date_sk"),
    int("cr_returned_time_sk"),
    int("cr_item_sk"),
    int("cr_refunded_customer_sk"),
    int("cr_refunded_cdemo_sk"),
    int("cr_refunded_hdemo_sk"),
    int("cr_refunded_addr_sk"),
    int("cr_returning_customer_sk"),
    int("cr_returning_cdemo_sk"),
    int("cr_returning_hdemo_sk"),
    int("cr_returning_addr_sk"),
    int("cr_call_center_sk"),
    int("cr_catalog_page_sk"),
    int("cr_ship_mode_sk"),
    int("cr_warehouse_sk"),
    int("cr_reason_sk"),
    int("cr_order_number"),
    int("cr_return_quantity"),
    money("cr_return_amount"),
    money("cr_return_tax"),
    money("cr_return_amt_inc_tax"),
    money("cr_fee"),
    money("cr_return_ship_cost"),
    money("cr_refunded_cash"),
    money("cr_reversed_charge"),
    money("cr_store_credit"),
    money("cr_net_loss"),
];

const DBGEN_VERSION: &[ColumnSpec] = &[
    var("dv_version", 16),
    date("dv_create_date"),
    var("dv_create_time", 16),
    var("dv_cmdline_args", 200),
];

use TpcdsTable as T;

const CUSTOMER_FKS: &[ForeignKey] = &[
    fk("c_current_cdemo_sk", T::CustomerDemographics),
    fk("c_current_hdemo_sk", T::HouseholdDemographics),
    fk("c_current_addr_sk", T::CustomerAddress),
    fk("c_first_shipto_date_sk", T::DateDim),
    fk("c_first_sales_date_sk", T::DateDim),
    fk("c_last_review_date_sk", T::DateDim),
];

const HOUSEHOLD_DEMOGRAPHICS_FKS: &[ForeignKey] = &[fk("hd_income_band_sk", T::IncomeBand)];

const STORE_FKS: &[ForeignKey] = &[fk("s_closed_date_sk", T::DateDim)];

const WEB_SITE_FKS: &[ForeignKey] = &[
    fk("web_open_date_sk", T::DateDim),
    fk("web_close_date_sk", T::DateDim),
];

const CALL_CENTER_FKS: &[ForeignKey] = &[
    fk("cc_closed_date_sk", T::DateDim),
    fk("cc_open_date_sk", T::DateDim),
];

const PROMOTION_FKS: &[ForeignKey] = &[
    fk("p_start_date_sk", T::DateDim),
    fk("p_end_date_sk", T::DateDim),
    fk("p_item_sk", T::Item),
];

const WEB_PAGE_FKS: &[ForeignKey] = &[
    fk("wp_creation_date_sk", T::DateDim),
    fk("wp_access_date_sk", T::DateDim),
    fk("wp_customer_sk", T::Customer),
];

const CATALOG_PAGE_FKS: &[ForeignKey] = &[
    fk("cp_start_date_sk", T::DateDim),
    fk("cp_end_date_sk", T::DateDim),
];

const INVENTORY_FKS: &[ForeignKey] = &[
    fk("inv_date_sk", T::DateDim),
    fk("inv_item_sk", T::Item),
    fk("inv_warehouse_sk", T::Warehouse),
];

const STORE_SALES_FKS: &[ForeignKey] = &[
    fk("ss_sold_date_sk", T::DateDim),
    fk("ss_sold_time_sk", T::TimeDim),
    fk("ss_item_sk", T::Item),
    fk("ss_customer_sk", T::Customer),
    fk("ss_cdemo_sk", T::CustomerDemographics),
    fk("ss_hdemo_sk", T::HouseholdDemographics),
    fk("ss_addr_sk", T::CustomerAddress),
    fk("ss_store_sk", T::Store),
    fk("ss_promo_sk", T::Promotion),
];

const WEB_SALES_FKS: &[ForeignKey] = &[
    fk("ws_sold_date_sk", T::DateDim),
    fk("ws_sold_time_sk", T::TimeDim),
    fk("ws_ship_date_sk", T::DateDim),
    fk("ws_item_sk", T::Item),
    fk("ws_bill_customer_sk", T::Customer),
    fk("ws_bill_cdemo_sk", T::CustomerDemographics),
    fk("ws_bill_hdemo_sk", T::HouseholdDemographics),
    fk("ws_bill_addr_sk", T::CustomerAddress),
    fk("ws_ship_customer_sk", T::Customer),
    fk("ws_ship_cdemo_sk", T::CustomerDemographics),
    fk("ws_ship_hdemo_sk", T::HouseholdDemographics),
    fk("ws_ship_addr_sk", T::CustomerAddress),
    fk("ws_web_page_sk", T::WebPage),
    fk("ws_web_site_sk", T::WebSite),
    fk("ws_ship_mode_sk", T::ShipMode),
    fk("ws_warehouse_sk", T::Warehouse),
    fk("ws_promo_sk", T::Promotion),
];

const CATALOG_SALES_FKS: &[ForeignKey] = &[
    fk("cs_sold_date_sk", T::DateDim),
    fk("cs_sold_time_sk", T::TimeDim),
    fk("cs_ship_date_sk", T::DateDim),
    fk("cs_bill_customer_sk", T::Customer),
    fk("cs_bill_cdemo_sk", T::CustomerDemographics),
    fk("cs_bill_hdemo_sk", T::HouseholdDemographics),
    fk("cs_bill_addr_sk", T::CustomerAddress),
    fk("cs_ship_customer_sk", T::Customer),
    fk("cs_ship_cdemo_sk", T::CustomerDemographics),
    fk("cs_ship_hdemo_sk", T::HouseholdDemographics),
    fk("cs_ship_addr_sk", T::CustomerAddress),
    fk("cs_call_center_sk", T::CallCenter),
    fk("cs_catalog_page_sk", T::CatalogPage),
    fk("cs_ship_mode_sk", T::ShipMode),
    fk("cs_warehouse_sk", T::Warehouse),
    fk("cs_item_sk", T::Item),
    fk("cs_promo_sk", T::Promotion),
];

const STORE_RETURNS_FKS: &[ForeignKey] = &[
    fk("sr_returned_date_sk", T::DateDim),
    fk("sr_return_time_sk", T::TimeDim),
    fk("sr_item_sk", T::Item),
    fk("sr_customer_sk", T::Customer),
    fk("sr_cdemo_sk", T::CustomerDemographics),
    fk("sr_hdemo_sk", T::HouseholdDemographics),
    fk("sr_addr_sk", T::CustomerAddress),
    fk("sr_store_sk", T::Store),
    fk("sr_reason_sk", T::Reason),
];

const WEB_RETURNS_FKS: &[ForeignKey] = &[
    fk("wr_returned_date_sk", T::DateDim),
    fk("wr_returned_time_sk", T::TimeDim),
    fk("wr_item_sk", T::Item),
    fk("wr_refunded_customer_sk", T::Customer),
    fk("wr_refunded_cdemo_sk", T::CustomerDemographics),
    fk("wr_refunded_hdemo_sk", T::HouseholdDemographics),
    fk("wr_refunded_addr_sk", T::CustomerAddress),
    fk("wr_returning_customer_sk", T::Customer),
    fk("wr_returning_cdemo_sk", T::CustomerDemographics),
    fk("wr_returning_hdemo_sk", T::HouseholdDemographics),
    fk("wr_returning_addr_sk", T::CustomerAddress),
    fk("wr_web_page_sk", T::WebPage),
    fk("wr_reason_sk", T::Reason),
];

const CATALOG_RETURNS_FKS: &[ForeignKey] = &[
    fk("cr_returned_date_sk", T::DateDim),
    fk("cr_returned_time_sk", T::TimeDim),
    fk("cr_item_sk", T::Item),
    fk("cr_refunded_customer_sk", T::Customer),
    fk("cr_refunded_cdemo_sk", T::CustomerDemographics),
    fk("cr_refunded_hdemo_sk", T::HouseholdDemographics),
    fk("cr_refunded_addr_sk", T::CustomerAddress),
    fk("cr_returning_customer_sk", T::Customer),
    fk("cr_returning_cdemo_sk", T::CustomerDemographics),
    fk("cr_returning_hdemo_sk", T::HouseholdDemographics),
    fk("cr_returning_addr_sk", T::CustomerAddress),
    fk("cr_call_center_sk", T::CallCenter),
    fk("cr_catalog_page_sk", T::CatalogPage),
    fk("cr_ship_mode_sk", T::ShipMode),
    fk("cr_warehouse_sk", T::Warehouse),
    fk("cr_reason_sk", T::Reason),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tables_are_unique() {
        let mut names: Vec<&str> = TpcdsTable::KNOWN.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 25);
        assert!(!TpcdsTable::DATA_TABLES.contains(&TpcdsTable::DbgenVersion));
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(TpcdsTable::DateDim.columns().len(), 28);
        assert_eq!(TpcdsTable::Store.columns().len(), 29);
        assert_eq!(TpcdsTable::StoreSales.columns().len(), 23);
        assert_eq!(TpcdsTable::WebSales.columns().len(), 34);
        assert_eq!(TpcdsTable::CatalogSales.columns().len(), 34);
        assert_eq!(TpcdsTable::StoreReturns.columns().len(), 20);
        assert_eq!(TpcdsTable::WebReturns.columns().len(), 24);
        assert_eq!(TpcdsTable::CatalogReturns.columns().len(), 27);
        assert_eq!(TpcdsTable::CallCenter.columns().len(), 31);
    }

    #[test]
    fn test_foreign_key_columns_exist() {
        for table in TpcdsTable::KNOWN {
            for key in table.foreign_keys() {
                assert!(
                    table.column_index(key.column).is_some(),
                    "{} has no column {}",
                    table,
                    key.column
                );
            }
            for key in table.primary_key() {
                assert!(table.column_index(key).is_some());
            }
        }
    }

    #[test]
    fn test_drop_order_puts_dependents_first() {
        let order = TpcdsTable::drop_order();
        assert_eq!(order.len(), TpcdsTable::KNOWN.len());
        let pos = |t: TpcdsTable| order.iter().position(|o| *o == t).unwrap();
        for table in TpcdsTable::KNOWN {
            for dep in table.dependencies() {
                assert!(pos(table) < pos(dep), "{} must drop before {}", table, dep);
            }
        }
        assert!(pos(TpcdsTable::StoreReturns) < pos(TpcdsTable::StoreSales));
    }

    #[test]
    fn test_create_order_is_reverse() {
        let mut drop = TpcdsTable::drop_order();
        drop.reverse();
        assert_eq!(TpcdsTable::create_order(), drop);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "STORE_SALES".parse::<TpcdsTable>().unwrap(),
            TpcdsTable::StoreSales
        );
        assert_eq!("item.dat".parse::<TpcdsTable>().unwrap(), TpcdsTable::Item);
        assert!("nope".parse::<TpcdsTable>().is_err());
    }

    #[test]
    fn test_primary_key_defaults_to_surrogate() {
        assert_eq!(TpcdsTable::Item.primary_key(), &["i_item_sk"]);
        assert_eq!(
            TpcdsTable::StoreSales.primary_key(),
            &["ss_item_sk", "ss_ticket_number"]
        );
    }
}
