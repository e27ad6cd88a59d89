//! 物料模块建表脚本（版本 200-299）

use erp_adapter_postgres::Migration;

const CREATE_MATERIAL_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS material_categories (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    description VARCHAR(1000),
    parent_id UUID REFERENCES material_categories (id),
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_material_categories_parent CHECK (parent_id IS NULL OR parent_id <> id)
);
CREATE INDEX IF NOT EXISTS idx_material_categories_parent_id ON material_categories (parent_id);
"#;

const CREATE_MATERIAL_CARDS: &str = r#"
CREATE TABLE IF NOT EXISTS material_cards (
    id UUID PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    description VARCHAR(1000),
    category_id UUID REFERENCES material_categories (id),
    material_type SMALLINT NOT NULL DEFAULT 1,
    unit_of_measure VARCHAR(20) NOT NULL,
    unit_price NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (unit_price >= 0),
    min_stock_level NUMERIC(18, 4) NOT NULL DEFAULT 0 CHECK (min_stock_level >= 0),
    max_stock_level NUMERIC(18, 4),
    barcode VARCHAR(100) UNIQUE,
    status SMALLINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_by UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_by UUID,
    is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT chk_material_cards_stock_levels
        CHECK (max_stock_level IS NULL OR max_stock_level >= min_stock_level)
);
CREATE INDEX IF NOT EXISTS idx_material_cards_category_id ON material_cards (category_id);
"#;

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(200, "create_material_categories", CREATE_MATERIAL_CATEGORIES),
        Migration::new(201, "create_material_cards", CREATE_MATERIAL_CARDS),
    ]
}
