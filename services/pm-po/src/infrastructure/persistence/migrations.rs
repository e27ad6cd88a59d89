//! 采购模块建表脚本（版本 500-599）

use erp_adapter_postgres::Migration;

const CREATE_SUPPLIER_TYPES: &str = r#"
CREATE TABLE IF NOT EXISTS supplier_types (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    description VARCHAR(1000),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
"#;

const CREATE_SUPPLIERS: &str = r#"
CREATE TABLE IF NOT EXISTS suppliers (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    supplier_type_id UUID REFERENCES supplier_types (id),
    tax_number VARCHAR(50),
    contact_person VARCHAR(100),
    email VARCHAR(255),
    phone VARCHAR(30),
    address VARCHAR(500),
    payment_terms_days INTEGER NOT NULL DEFAULT 30 CHECK (payment_terms_days >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
CREATE INDEX IF NOT EXISTS idx_suppliers_supplier_type_id ON suppliers (supplier_type_id);
"#;

const CREATE_PURCHASE_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS purchase_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(50) NOT NULL UNIQUE,
    supplier_id UUID NOT NULL REFERENCES suppliers (id),
    material_id UUID NOT NULL REFERENCES material_cards (id),
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (unit_price >= 0),
    total_amount NUMERIC(18, 4) NOT NULL DEFAULT 0,
    order_date DATE NOT NULL,
    expected_delivery_date DATE,
    status SMALLINT NOT NULL DEFAULT 1,
    notes VARCHAR(2000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_purchase_orders_delivery
        CHECK (expected_delivery_date IS NULL OR expected_delivery_date >= order_date)
);
CREATE INDEX IF NOT EXISTS idx_purchase_orders_supplier_id ON purchase_orders (supplier_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(500, "create_supplier_types", CREATE_SUPPLIER_TYPES),
        Migration::new(501, "create_suppliers", CREATE_SUPPLIERS),
        Migration::new(502, "create_purchase_orders", CREATE_PURCHASE_ORDERS),
    ]
}
