//! SQLite schema definitions
//!
//! The production tables are the contract written by the upstream cleansing
//! pipeline. They are created here only so an empty store is usable; the
//! warehouse never writes to them.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- Production (cleansed source entities, read-only for the warehouse)
-- =============================================================================
CREATE TABLE IF NOT EXISTS production_customers (
    customer_id TEXT PRIMARY KEY,
    first_name TEXT,
    last_name TEXT,
    email TEXT,
    phone TEXT,
    city TEXT,
    state TEXT,
    country TEXT,
    age_group TEXT,
    registration_date TEXT,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS production_products (
    product_id TEXT PRIMARY KEY,
    product_name TEXT,
    category TEXT,
    sub_category TEXT,
    price REAL,
    cost REAL,
    brand TEXT,
    stock_quantity INTEGER,
    supplier_id TEXT,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS production_transactions (
    transaction_id TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL,
    transaction_date TEXT NOT NULL,
    transaction_time TEXT,
    payment_method TEXT,
    shipping_address TEXT,
    total_amount REAL NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_production_transactions_date
    ON production_transactions(transaction_date);

CREATE TABLE IF NOT EXISTS production_transaction_items (
    item_id TEXT PRIMARY KEY,
    transaction_id TEXT NOT NULL,
    product_id TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    discount_percentage REAL NOT NULL DEFAULT 0,
    line_total REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_production_items_transaction
    ON production_transaction_items(transaction_id);

-- =============================================================================
-- 1. Customer dimension (SCD Type 2)
-- =============================================================================
CREATE TABLE IF NOT EXISTS dim_customers (
    customer_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id TEXT NOT NULL,
    first_name TEXT,
    last_name TEXT,
    email TEXT,
    phone TEXT,
    city TEXT,
    state TEXT,
    country TEXT,
    age_group TEXT,
    registration_date TEXT,
    is_current INTEGER NOT NULL DEFAULT 1,
    effective_date TEXT NOT NULL,
    end_date TEXT,
    CHECK (is_current = 1 OR end_date IS NOT NULL)
);

CREATE INDEX IF NOT EXISTS idx_dim_customers_business_key ON dim_customers(customer_id);
-- At most one current version per business key
CREATE UNIQUE INDEX IF NOT EXISTS idx_dim_customers_current
    ON dim_customers(customer_id)
    WHERE is_current = 1;

-- =============================================================================
-- 2. Product dimension (SCD Type 2)
-- =============================================================================
CREATE TABLE IF NOT EXISTS dim_products (
    product_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id TEXT NOT NULL,
    product_name TEXT,
    category TEXT,
    sub_category TEXT,
    price REAL,
    cost REAL,
    brand TEXT,
    is_current INTEGER NOT NULL DEFAULT 1,
    effective_date TEXT NOT NULL,
    end_date TEXT,
    CHECK (is_current = 1 OR end_date IS NOT NULL)
);

CREATE INDEX IF NOT EXISTS idx_dim_products_business_key ON dim_products(product_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_dim_products_current
    ON dim_products(product_id)
    WHERE is_current = 1;

-- =============================================================================
-- 3. Date dimension (date_sk = YYYYMMDD)
-- =============================================================================
CREATE TABLE IF NOT EXISTS dim_date (
    date_sk INTEGER PRIMARY KEY,
    date_id TEXT NOT NULL UNIQUE,
    day_of_month INTEGER NOT NULL CHECK(day_of_month BETWEEN 1 AND 31),
    day_of_week INTEGER NOT NULL CHECK(day_of_week BETWEEN 1 AND 7),
    day_name TEXT NOT NULL,
    month INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
    month_name TEXT NOT NULL,
    quarter INTEGER NOT NULL CHECK(quarter BETWEEN 1 AND 4),
    year INTEGER NOT NULL,
    week_of_year INTEGER NOT NULL CHECK(week_of_year BETWEEN 1 AND 53),
    is_weekend INTEGER NOT NULL
);

-- =============================================================================
-- 4. Payment method dimension
-- =============================================================================
CREATE TABLE IF NOT EXISTS dim_payment_method (
    payment_method_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    payment_method_id TEXT NOT NULL UNIQUE,
    payment_method_name TEXT NOT NULL,
    category TEXT NOT NULL CHECK(category IN ('Card', 'Digital', 'Cash', 'Other')),
    is_active INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 5. Sales fact (one row per transaction line item)
-- =============================================================================
CREATE TABLE IF NOT EXISTS fact_sales (
    sale_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_id TEXT NOT NULL,
    item_id TEXT NOT NULL UNIQUE,
    customer_sk INTEGER NOT NULL REFERENCES dim_customers(customer_sk),
    product_sk INTEGER NOT NULL REFERENCES dim_products(product_sk),
    date_sk INTEGER NOT NULL REFERENCES dim_date(date_sk),
    payment_method_sk INTEGER REFERENCES dim_payment_method(payment_method_sk),
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    discount_percentage REAL NOT NULL,
    line_total REAL NOT NULL,
    transaction_total REAL NOT NULL,
    shipping_address TEXT
);

CREATE INDEX IF NOT EXISTS idx_fact_sales_date ON fact_sales(date_sk);
CREATE INDEX IF NOT EXISTS idx_fact_sales_product ON fact_sales(product_sk);
CREATE INDEX IF NOT EXISTS idx_fact_sales_customer ON fact_sales(customer_sk);

-- =============================================================================
-- 6. Aggregates (insert-once snapshots per grouping key)
-- =============================================================================
CREATE TABLE IF NOT EXISTS agg_daily_sales (
    date_sk INTEGER PRIMARY KEY REFERENCES dim_date(date_sk),
    total_sales REAL NOT NULL,
    total_units_sold INTEGER NOT NULL,
    transaction_count INTEGER NOT NULL,
    customer_count INTEGER NOT NULL,
    avg_transaction_value REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS agg_product_sales (
    product_sk INTEGER PRIMARY KEY REFERENCES dim_products(product_sk),
    total_sales REAL NOT NULL,
    total_units_sold INTEGER NOT NULL,
    transaction_count INTEGER NOT NULL,
    avg_discount REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS agg_customer_lifetime (
    customer_sk INTEGER PRIMARY KEY REFERENCES dim_customers(customer_sk),
    total_spent REAL NOT NULL,
    total_units_purchased INTEGER NOT NULL,
    transaction_count INTEGER NOT NULL,
    first_purchase_date TEXT NOT NULL,
    last_purchase_date TEXT NOT NULL,
    avg_transaction_value REAL NOT NULL
);
"#;
