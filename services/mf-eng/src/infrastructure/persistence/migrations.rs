//! 工程模块建表脚本（版本 700-799）

use erp_adapter_postgres::Migration;

const CREATE_BOM_HEADERS: &str = r#"
CREATE TABLE IF NOT EXISTS bom_headers (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    product_material_id UUID NOT NULL REFERENCES material_cards (id),
    version VARCHAR(20) NOT NULL DEFAULT '1',
    base_quantity NUMERIC(18, 4) NOT NULL DEFAULT 1 CHECK (base_quantity > 0),
    description VARCHAR(1000),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE
);
CREATE INDEX IF NOT EXISTS idx_bom_headers_product ON bom_headers (product_material_id);
"#;

const CREATE_BOM_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS bom_items (
    id UUID PRIMARY KEY,
    bom_header_id UUID NOT NULL REFERENCES bom_headers (id),
    component_material_id UUID NOT NULL REFERENCES material_cards (id),
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    unit_of_measure VARCHAR(20) NOT NULL,
    scrap_rate NUMERIC(7, 4) NOT NULL DEFAULT 0 CHECK (scrap_rate >= 0 AND scrap_rate <= 100),
    sequence INTEGER NOT NULL DEFAULT 0 CHECK (sequence >= 0),
    notes VARCHAR(1000),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT uq_bom_items_component UNIQUE (bom_header_id, component_material_id)
);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(700, "create_bom_headers", CREATE_BOM_HEADERS),
        Migration::new(701, "create_bom_items", CREATE_BOM_ITEMS),
    ]
}
