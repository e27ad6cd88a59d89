//! 仓储模块建表脚本（版本 300-399）

use erp_adapter_postgres::Migration;

const CREATE_WAREHOUSES: &str = r#"
CREATE TABLE IF NOT EXISTS warehouses (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    address VARCHAR(500),
    description VARCHAR(1000),
    capacity NUMERIC(18, 4) CHECK (capacity IS NULL OR capacity >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
"#;

const CREATE_LOCATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id UUID PRIMARY KEY,
    warehouse_id UUID NOT NULL REFERENCES warehouses (id),
    code VARCHAR(50) NOT NULL,
    name VARCHAR(200) NOT NULL,
    description VARCHAR(1000),
    capacity NUMERIC(18, 4) CHECK (capacity IS NULL OR capacity >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT uq_locations_warehouse_code UNIQUE (warehouse_id, code)
);
CREATE INDEX IF NOT EXISTS idx_locations_warehouse_id ON locations (warehouse_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(300, "create_warehouses", CREATE_WAREHOUSES),
        Migration::new(301, "create_locations", CREATE_LOCATIONS),
    ]
}
