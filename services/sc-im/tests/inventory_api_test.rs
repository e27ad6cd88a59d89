mod common;

use axum::http::StatusCode;
use common::{TestApp, id_of};
use serde_json::{Value, json};

async fn movement(app: &TestApp, token: &str, body: Value) -> (StatusCode, Value) {
    app.call("POST", "/api/material-movements", token, Some(body)).await
}

async fn entries_of(app: &TestApp, token: &str) -> Vec<Value> {
    let (status, listed) = app.call("GET", "/api/stock-entries?page_size=100", token, None).await;
    assert_eq!(status, StatusCode::OK);
    listed["items"].as_array().unwrap().clone()
}

fn quantity_at(entries: &[Value], location: &str) -> Option<String> {
    entries
        .iter()
        .find(|e| e["location_id"] == location)
        .map(|e| e["quantity"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn receipt_issue_and_transfer_post_to_stock_entries() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-100").await;
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;
    let rack_b = id_of(
        &app.create(
            &token,
            "/api/locations",
            json!({ "warehouse_id": main, "code": "B-01", "name": "Rack B" }),
        )
        .await,
    );

    let receipt = app
        .create(
            &token,
            "/api/material-movements",
            json!({
                "movement_number": "MV-0001",
                "material_id": material,
                "movement_type": "Receipt",
                "quantity": "10",
                "target_warehouse_id": main,
                "target_location_id": rack_a,
                "reference": "PO-77"
            }),
        )
        .await;
    assert_eq!(receipt["movement_type"], "Receipt");
    assert!(receipt["source_warehouse_id"].is_null());
    assert_eq!(receipt["target_location_id"], rack_a.as_str());

    let entries = entries_of(&app, &token).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("10"));

    app.create(
        &token,
        "/api/material-movements",
        json!({
            "movement_number": "MV-0002",
            "material_id": material,
            "movement_type": "Transfer",
            "quantity": "4",
            "source_warehouse_id": main,
            "source_location_id": rack_a,
            "target_warehouse_id": main,
            "target_location_id": rack_b
        }),
    )
    .await;

    app.create(
        &token,
        "/api/material-movements",
        json!({
            "movement_number": "MV-0003",
            "material_id": material,
            "movement_type": "Issue",
            "quantity": "1",
            "source_warehouse_id": main,
            "source_location_id": rack_b
        }),
    )
    .await;

    let entries = entries_of(&app, &token).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("6"));
    assert_eq!(quantity_at(&entries, &rack_b).as_deref(), Some("3"));

    let (_, movements) = app.call("GET", "/api/material-movements", &token, None).await;
    assert_eq!(movements["total"], 3);
}

#[tokio::test]
async fn insufficient_stock_leaves_entries_untouched() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-200").await;
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;
    let (overflow, rack_x) = app.storage(&token, "WH-02", "X-01").await;

    // 无台账时出库
    let (status, problem) = movement(
        &app,
        &token,
        json!({
            "movement_number": "MV-1",
            "material_id": material,
            "movement_type": "Issue",
            "quantity": "1",
            "source_warehouse_id": main,
            "source_location_id": rack_a
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", problem);

    app.create(
        &token,
        "/api/stock-entries",
        json!({
            "material_id": material,
            "warehouse_id": main,
            "location_id": rack_a,
            "quantity": "5",
            "reserved_quantity": "2"
        }),
    )
    .await;

    // 调拨超过可用量：整体回滚，目标台账不应出现
    let (status, problem) = movement(
        &app,
        &token,
        json!({
            "movement_number": "MV-2",
            "material_id": material,
            "movement_type": "Transfer",
            "quantity": "4",
            "source_warehouse_id": main,
            "source_location_id": rack_a,
            "target_warehouse_id": overflow,
            "target_location_id": rack_x
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(problem["detail"].as_str().unwrap().contains("below reserved quantity"));

    let (status, problem) = movement(
        &app,
        &token,
        json!({
            "movement_number": "MV-3",
            "material_id": material,
            "movement_type": "Adjustment",
            "quantity": "6",
            "source_warehouse_id": main,
            "source_location_id": rack_a
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(problem["detail"].as_str().unwrap().contains("Insufficient stock"));

    let entries = entries_of(&app, &token).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("5"));
    let (_, movements) = app.call("GET", "/api/material-movements", &token, None).await;
    assert_eq!(movements["total"], 0);

    // 未失败的编号仍可使用
    let (status, _) = movement(
        &app,
        &token,
        json!({
            "movement_number": "MV-2",
            "material_id": material,
            "movement_type": "Transfer",
            "quantity": "3",
            "source_warehouse_id": main,
            "source_location_id": rack_a,
            "target_warehouse_id": overflow,
            "target_location_id": rack_x
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let entries = entries_of(&app, &token).await;
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("2"));
    assert_eq!(quantity_at(&entries, &rack_x).as_deref(), Some("3"));
}

#[tokio::test]
async fn movement_request_is_validated() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-300").await;
    let service = id_of(
        &app.create(
            &token,
            "/api/material-cards",
            json!({ "code": "SVC-1", "name": "Installation", "unit_of_measure": "HR", "material_type": "Service" }),
        )
        .await,
    );
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;
    let (other, rack_o) = app.storage(&token, "WH-02", "O-01").await;

    let cases = [
        // 入库不允许来源
        json!({ "movement_number": "V-1", "material_id": material, "movement_type": "Receipt", "quantity": "1",
                "source_warehouse_id": main, "source_location_id": rack_a,
                "target_warehouse_id": main, "target_location_id": rack_a }),
        // 调拨来源与目标相同
        json!({ "movement_number": "V-2", "material_id": material, "movement_type": "Transfer", "quantity": "1",
                "source_warehouse_id": main, "source_location_id": rack_a,
                "target_warehouse_id": main, "target_location_id": rack_a }),
        // 数量须为正
        json!({ "movement_number": "V-3", "material_id": material, "movement_type": "Receipt", "quantity": "0",
                "target_warehouse_id": main, "target_location_id": rack_a }),
        // 仓库与库位须成对
        json!({ "movement_number": "V-4", "material_id": material, "movement_type": "Receipt", "quantity": "1",
                "target_warehouse_id": main }),
        // 库位不属于该仓库
        json!({ "movement_number": "V-5", "material_id": material, "movement_type": "Receipt", "quantity": "1",
                "target_warehouse_id": main, "target_location_id": rack_o }),
        // 服务类物料不计库存
        json!({ "movement_number": "V-6", "material_id": service, "movement_type": "Receipt", "quantity": "1",
                "target_warehouse_id": other, "target_location_id": rack_o }),
        // 物料不存在
        json!({ "movement_number": "V-7", "material_id": "0190f5a0-0000-7000-8000-000000000001",
                "movement_type": "Receipt", "quantity": "1",
                "target_warehouse_id": main, "target_location_id": rack_a }),
        // 编号为空
        json!({ "movement_number": "", "material_id": material, "movement_type": "Receipt", "quantity": "1",
                "target_warehouse_id": main, "target_location_id": rack_a }),
    ];
    for body in cases {
        let (status, problem) = movement(&app, &token, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} -> {}", body, problem);
    }
    assert!(entries_of(&app, &token).await.is_empty());

    let receipt = json!({
        "movement_number": "MV-9",
        "material_id": material,
        "movement_type": "Receipt",
        "quantity": "2",
        "target_warehouse_id": main,
        "target_location_id": rack_a
    });
    let (status, _) = movement(&app, &token, receipt.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = movement(&app, &token, receipt).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let entries = entries_of(&app, &token).await;
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("2"));
}

#[tokio::test]
async fn movement_update_only_touches_descriptive_fields() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-400").await;
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;

    let created = app
        .create(
            &token,
            "/api/material-movements",
            json!({
                "movement_number": "MV-1",
                "material_id": material,
                "movement_type": "Receipt",
                "quantity": "8",
                "target_warehouse_id": main,
                "target_location_id": rack_a
            }),
        )
        .await;
    let id = id_of(&created);

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/api/material-movements/{}", id),
            &token,
            Some(json!({ "reference": "  GR-12 ", "description": "Cycle count", "quantity": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["reference"], "GR-12");
    assert_eq!(updated["description"], "Cycle count");
    assert_eq!(updated["quantity"], "8");
    assert_eq!(updated["movement_number"], "MV-1");

    // 删除移动记录不冲回库存
    let (status, _) = app
        .call("DELETE", &format!("/api/material-movements/{}", id), &token, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let entries = entries_of(&app, &token).await;
    assert_eq!(quantity_at(&entries, &rack_a).as_deref(), Some("8"));
}

#[tokio::test]
async fn stock_entry_rules() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-500").await;
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;

    let entry = json!({
        "material_id": material,
        "warehouse_id": main,
        "location_id": rack_a,
        "quantity": "10",
        "reserved_quantity": "3",
        "unit_cost": "2.50"
    });
    let created = app.create(&token, "/api/stock-entries", entry.clone()).await;
    assert_eq!(created["available_quantity"], "7");
    assert_eq!(created["status"], "Active");

    // 同一物料与库存地点只有一条台账
    let (status, _) = app.call("POST", "/api/stock-entries", &token, Some(entry)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let id = id_of(&created);
    let invalid = [
        json!({ "quantity": "-1" }),
        json!({ "quantity": "2", "reserved_quantity": "3" }),
        json!({ "quantity": "2", "unit_cost": "-0.01" }),
    ];
    for body in invalid {
        let (status, problem) = app
            .call("PUT", &format!("/api/stock-entries/{}", id), &token, Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} -> {}", body, problem);
    }

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/api/stock-entries/{}", id),
            &token,
            Some(json!({ "quantity": "12", "reserved_quantity": "0", "status": "Blocked" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], "12");
    assert_eq!(updated["status"], "Blocked");
    assert_eq!(updated["location_id"], rack_a.as_str());

    // 已删除的台账不接受过账
    let (status, _) = app
        .call("DELETE", &format!("/api/stock-entries/{}", id), &token, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, problem) = movement(
        &app,
        &token,
        json!({
            "movement_number": "MV-1",
            "material_id": material,
            "movement_type": "Receipt",
            "quantity": "1",
            "target_warehouse_id": main,
            "target_location_id": rack_a
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(problem["detail"].as_str().unwrap().contains("restored"));
}

#[tokio::test]
async fn material_stock_summary() {
    let app = TestApp::new();
    let token = app.admin_token();
    let material = app.material(&token, "M-600").await;
    let (main, rack_a) = app.storage(&token, "WH-01", "A-01").await;
    let rack_b = id_of(
        &app.create(
            &token,
            "/api/locations",
            json!({ "warehouse_id": main, "code": "B-01", "name": "Rack B" }),
        )
        .await,
    );
    let (overflow, rack_x) = app.storage(&token, "WH-02", "X-01").await;

    for (warehouse, location, quantity, reserved) in [
        (&main, &rack_a, "5", "1"),
        (&main, &rack_b, "7", "0"),
        (&overflow, &rack_x, "3", "3"),
    ] {
        app.create(
            &token,
            "/api/stock-entries",
            json!({
                "material_id": material,
                "warehouse_id": warehouse,
                "location_id": location,
                "quantity": quantity,
                "reserved_quantity": reserved
            }),
        )
        .await;
    }

    let (status, summary) = app
        .call("GET", &format!("/api/material-cards/{}/stock", material), &token, None)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", summary);
    assert_eq!(summary["material_code"], "M-600");
    assert_eq!(summary["unit_of_measure"], "PCS");
    assert_eq!(summary["total_quantity"], "15");
    assert_eq!(summary["reserved_quantity"], "4");
    assert_eq!(summary["available_quantity"], "11");

    let warehouses = summary["warehouses"].as_array().unwrap();
    assert_eq!(warehouses.len(), 2);
    let main_row = warehouses.iter().find(|w| w["warehouse_id"] == main.as_str()).unwrap();
    assert_eq!(main_row["quantity"], "12");
    assert_eq!(main_row["locations"], 2);
    let overflow_row = warehouses
        .iter()
        .find(|w| w["warehouse_id"] == overflow.as_str())
        .unwrap();
    assert_eq!(overflow_row["available_quantity"], "0");

    let (status, _) = app
        .call(
            "GET",
            "/api/material-cards/0190f5a0-0000-7000-8000-000000000001/stock",
            &token,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call("GET", "/api/material-cards/not-a-uuid/stock", &token, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let reader = app.token(&["material-cards.read"]);
    let (status, _) = app
        .call("GET", &format!("/api/material-cards/{}/stock", material), &reader, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
