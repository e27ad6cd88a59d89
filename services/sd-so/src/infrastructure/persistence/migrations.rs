//! 销售模块建表脚本（版本 600-699）

use erp_adapter_postgres::Migration;

const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    tax_number VARCHAR(50),
    contact_person VARCHAR(100),
    email VARCHAR(255),
    phone VARCHAR(30),
    address VARCHAR(500),
    credit_limit NUMERIC(18, 2) NOT NULL DEFAULT 0 CHECK (credit_limit >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
"#;

const CREATE_CUSTOMER_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS customer_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(50) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES customers (id),
    material_id UUID NOT NULL REFERENCES material_cards (id),
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (unit_price >= 0),
    total_amount NUMERIC(18, 4) NOT NULL DEFAULT 0,
    order_date DATE NOT NULL,
    delivery_date DATE,
    status SMALLINT NOT NULL DEFAULT 1,
    notes VARCHAR(2000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_customer_orders_delivery CHECK (delivery_date IS NULL OR delivery_date >= order_date)
);
CREATE INDEX IF NOT EXISTS idx_customer_orders_customer_id ON customer_orders (customer_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(600, "create_customers", CREATE_CUSTOMERS),
        Migration::new(601, "create_customer_orders", CREATE_CUSTOMER_ORDERS),
    ]
}
