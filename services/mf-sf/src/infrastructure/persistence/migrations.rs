//! 车间执行建表脚本（版本 800-899）

use erp_adapter_postgres::Migration;

const CREATE_WORK_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS work_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(50) NOT NULL UNIQUE,
    product_material_id UUID NOT NULL REFERENCES material_cards (id),
    bom_header_id UUID REFERENCES bom_headers (id),
    planned_quantity NUMERIC(18, 4) NOT NULL CHECK (planned_quantity > 0),
    produced_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (produced_quantity >= 0),
    scrap_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (scrap_quantity >= 0),
    planned_start TIMESTAMPTZ,
    planned_end TIMESTAMPTZ,
    actual_start TIMESTAMPTZ,
    actual_end TIMESTAMPTZ,
    priority SMALLINT NOT NULL DEFAULT 3 CHECK (priority BETWEEN 1 AND 5),
    status SMALLINT NOT NULL DEFAULT 1,
    notes VARCHAR(2000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_work_orders_schedule
        CHECK (planned_start IS NULL OR planned_end IS NULL OR planned_end >= planned_start)
);
CREATE INDEX IF NOT EXISTS idx_work_orders_product ON work_orders (product_material_id);
"#;

const CREATE_WORK_ORDER_OPERATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS work_order_operations (
    id UUID PRIMARY KEY,
    work_order_id UUID NOT NULL REFERENCES work_orders (id),
    sequence INTEGER NOT NULL CHECK (sequence >= 0),
    name VARCHAR(200) NOT NULL,
    work_center VARCHAR(100),
    planned_minutes INTEGER NOT NULL DEFAULT 0 CHECK (planned_minutes >= 0),
    actual_minutes INTEGER NOT NULL DEFAULT 0 CHECK (actual_minutes >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    notes VARCHAR(1000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT uq_work_order_operations_sequence UNIQUE (work_order_id, sequence)
);
"#;

const CREATE_PRODUCTION_CONFIRMATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS production_confirmations (
    id UUID PRIMARY KEY,
    confirmation_number VARCHAR(50) NOT NULL UNIQUE,
    work_order_id UUID NOT NULL REFERENCES work_orders (id),
    operation_id UUID REFERENCES work_order_operations (id),
    confirmed_quantity NUMERIC(18, 4) NOT NULL CHECK (confirmed_quantity > 0),
    scrap_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (scrap_quantity >= 0),
    confirmation_date TIMESTAMPTZ NOT NULL,
    notes VARCHAR(1000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
CREATE INDEX IF NOT EXISTS idx_production_confirmations_work_order
    ON production_confirmations (work_order_id);
"#;

const CREATE_MATERIAL_CONSUMPTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS material_consumptions (
    id UUID PRIMARY KEY,
    work_order_id UUID NOT NULL REFERENCES work_orders (id),
    material_id UUID NOT NULL REFERENCES material_cards (id),
    warehouse_id UUID NOT NULL REFERENCES warehouses (id),
    location_id UUID REFERENCES locations (id),
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    consumption_date TIMESTAMPTZ NOT NULL,
    notes VARCHAR(1000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
CREATE INDEX IF NOT EXISTS idx_material_consumptions_work_order
    ON material_consumptions (work_order_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(800, "create_work_orders", CREATE_WORK_ORDERS),
        Migration::new(801, "create_work_order_operations", CREATE_WORK_ORDER_OPERATIONS),
        Migration::new(802, "create_production_confirmations", CREATE_PRODUCTION_CONFIRMATIONS),
        Migration::new(803, "create_material_consumptions", CREATE_MATERIAL_CONSUMPTIONS),
    ]
}
