//! 库存模块建表脚本（版本 400-499）

use erp_adapter_postgres::Migration;

const CREATE_STOCK_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS stock_entries (
    id UUID PRIMARY KEY,
    material_id UUID NOT NULL REFERENCES material_cards (id),
    warehouse_id UUID NOT NULL REFERENCES warehouses (id),
    location_id UUID NOT NULL REFERENCES locations (id),
    quantity NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    reserved_quantity NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (reserved_quantity >= 0),
    unit_cost NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (unit_cost >= 0),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT uq_stock_entries_position UNIQUE (material_id, warehouse_id, location_id),
    CONSTRAINT chk_stock_entries_reserved CHECK (reserved_quantity <= quantity)
);
CREATE INDEX IF NOT EXISTS idx_stock_entries_material_id ON stock_entries (material_id);
"#;

const CREATE_MATERIAL_MOVEMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS material_movements (
    id UUID PRIMARY KEY,
    movement_number VARCHAR(50) NOT NULL UNIQUE,
    material_id UUID NOT NULL REFERENCES material_cards (id),
    movement_type SMALLINT NOT NULL,
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    source_warehouse_id UUID REFERENCES warehouses (id),
    source_location_id UUID REFERENCES locations (id),
    target_warehouse_id UUID REFERENCES warehouses (id),
    target_location_id UUID REFERENCES locations (id),
    movement_date TIMESTAMPTZ NOT NULL,
    reference VARCHAR(100),
    description VARCHAR(1000),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
CREATE INDEX IF NOT EXISTS idx_material_movements_material_id ON material_movements (material_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(400, "create_stock_entries", CREATE_STOCK_ENTRIES),
        Migration::new(401, "create_material_movements", CREATE_MATERIAL_MOVEMENTS),
    ]
}
