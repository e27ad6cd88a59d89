mod common;

use axum::http::StatusCode;
use common::{TestApp, id_of};
use serde_json::json;

const MISSING: &str = "0190f5a0-0000-7000-8000-000000000001";

#[tokio::test]
async fn test_confirmations_drive_work_order_progress() {
    let app = TestApp::new();
    let token = app.token(&["*"]);
    let product = app.material(&token, "FRAME").await;
    let order_id = app.work_order(&token, "WO-100", &product, "10").await;
    let order_uri = format!("/api/work-orders/{}", order_id);

    // 计划状态不接收报工
    let (status, problem) = app
        .call(
            "POST",
            "/api/production-confirmations",
            &token,
            Some(json!({ "confirmation_number": "PC-1", "work_order_id": order_id, "confirmed_quantity": "4" })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert!(problem["detail"].as_str().unwrap().contains("does not accept confirmations"));

    let (status, released) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({
                "order_number": "WO-100",
                "product_material_id": product,
                "planned_quantity": "10",
                "status": "Released"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["status"], "Released");
    assert!(released["actual_start"].is_null());

    app.create(
        &token,
        "/api/production-confirmations",
        json!({ "confirmation_number": "PC-1", "work_order_id": order_id, "confirmed_quantity": "4", "scrap_quantity": "1" }),
    )
    .await;
    let (_, order) = app.call("GET", &order_uri, &token, None).await;
    assert_eq!(order["status"], "InProgress");
    assert_eq!(order["produced_quantity"], "4");
    assert_eq!(order["scrap_quantity"], "1");
    assert!(!order["actual_start"].is_null());
    assert!(order["actual_end"].is_null());

    let (status, _) = app
        .call(
            "POST",
            "/api/production-confirmations",
            &token,
            Some(json!({ "confirmation_number": "PC-1", "work_order_id": order_id, "confirmed_quantity": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .call(
            "POST",
            "/api/production-confirmations",
            &token,
            Some(json!({ "confirmation_number": "PC-X", "work_order_id": order_id, "confirmed_quantity": "0" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.create(
        &token,
        "/api/production-confirmations",
        json!({ "confirmation_number": "PC-2", "work_order_id": order_id, "confirmed_quantity": "6" }),
    )
    .await;
    let (_, order) = app.call("GET", &order_uri, &token, None).await;
    assert_eq!(order["status"], "Completed");
    assert_eq!(order["produced_quantity"], "10");
    assert!(!order["actual_end"].is_null());

    // 完工后只读
    let (status, _) = app
        .call(
            "POST",
            "/api/production-confirmations",
            &token,
            Some(json!({ "confirmation_number": "PC-3", "work_order_id": order_id, "confirmed_quantity": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    let (status, _) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({ "order_number": "WO-100", "product_material_id": product, "planned_quantity": "12" })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let (_, listed) = app.call("GET", "/api/production-confirmations", &token, None).await;
    assert_eq!(listed["total"], 2);
}

#[tokio::test]
async fn test_work_order_validation() {
    let app = TestApp::new();
    let token = app.token(&["*"]);
    let chair = app.material(&token, "CHAIR").await;
    let table = app.material(&token, "TABLE").await;
    let chair_bom = app
        .create(
            &token,
            "/api/bom-headers",
            json!({ "code": "BOM-CHAIR", "name": "Chair", "product_material_id": chair }),
        )
        .await;

    for body in [
        json!({ "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "0" }),
        json!({ "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "5", "priority": 6 }),
        json!({
            "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "5",
            "planned_start": "2026-05-02T08:00:00Z", "planned_end": "2026-05-01T08:00:00Z"
        }),
        json!({ "order_number": "WO-1", "product_material_id": MISSING, "planned_quantity": "5" }),
        json!({ "order_number": "WO-1", "product_material_id": table, "planned_quantity": "5", "bom_header_id": chair_bom["id"] }),
    ] {
        let (status, problem) = app.call("POST", "/api/work-orders", &token, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", problem);
    }

    let order = app
        .create(
            &token,
            "/api/work-orders",
            json!({
                "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "5",
                "bom_header_id": chair_bom["id"], "priority": 1,
                "planned_start": "2026-05-01T08:00:00Z", "planned_end": "2026-05-03T17:00:00Z"
            }),
        )
        .await;
    assert_eq!(order["bom_header_id"], chair_bom["id"]);
    assert_eq!(order["priority"], 1);
    assert_eq!(order["produced_quantity"], "0");

    let (status, _) = app
        .call(
            "POST",
            "/api/work-orders",
            &token,
            Some(json!({ "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "5" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .call(
            "POST",
            "/api/work-orders",
            &token,
            Some(json!({ "order_number": "WO-2", "product_material_id": chair, "planned_quantity": "5", "status": "Completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    // 下达后产品不可更换
    let order_uri = format!("/api/work-orders/{}", id_of(&order));
    let (status, _) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({ "order_number": "WO-1", "product_material_id": chair, "planned_quantity": "5",
                         "bom_header_id": chair_bom["id"], "status": "Released" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({ "order_number": "WO-1", "product_material_id": table, "planned_quantity": "5" })),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn test_operations_listed_by_sequence() {
    let app = TestApp::new();
    let token = app.token(&["*"]);
    let product = app.material(&token, "SHELF").await;
    let first = app.work_order(&token, "WO-10", &product, "2").await;
    let second = app.work_order(&token, "WO-11", &product, "2").await;

    for (sequence, name) in [(20, "Paint"), (10, "Cut")] {
        app.create(
            &token,
            "/api/work-order-operations",
            json!({ "work_order_id": first, "sequence": sequence, "name": name, "planned_minutes": 30 }),
        )
        .await;
    }
    let (status, _) = app
        .call(
            "POST",
            "/api/work-order-operations",
            &token,
            Some(json!({ "work_order_id": first, "sequence": 10, "name": "Again" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let foreign = app
        .create(
            &token,
            "/api/work-order-operations",
            json!({ "work_order_id": second, "sequence": 10, "name": "Cut" }),
        )
        .await;

    for body in [
        json!({ "work_order_id": first, "sequence": 30, "name": "Pack", "planned_minutes": -1 }),
        json!({ "work_order_id": MISSING, "sequence": 30, "name": "Pack" }),
    ] {
        let (status, problem) = app.call("POST", "/api/work-order-operations", &token, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", problem);
    }

    let (status, operations) = app
        .call("GET", &format!("/api/work-orders/{}/operations", first), &token, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = operations
        .as_array()
        .unwrap()
        .iter()
        .map(|op| op["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Cut", "Paint"]);

    let (status, _) = app
        .call("GET", &format!("/api/work-orders/{}/operations", MISSING), &token, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let reader = app.token(&["work-orders.read"]);
    let (status, _) = app
        .call("GET", &format!("/api/work-orders/{}/operations", first), &reader, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 报工引用的工序须属于该工单
    app.call(
        "PUT",
        &format!("/api/work-orders/{}", first),
        &token,
        Some(json!({ "order_number": "WO-10", "product_material_id": product, "planned_quantity": "2", "status": "Released" })),
    )
    .await;
    let (status, problem) = app
        .call(
            "POST",
            "/api/production-confirmations",
            &token,
            Some(json!({
                "confirmation_number": "PC-10", "work_order_id": first,
                "operation_id": foreign["id"], "confirmed_quantity": "1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(problem["detail"].as_str().unwrap().contains("does not belong"));
}

#[tokio::test]
async fn test_material_consumptions() {
    let app = TestApp::new();
    let token = app.token(&["*"]);
    let product = app.material(&token, "BENCH").await;
    let plank = app.material(&token, "PLANK").await;
    let order = app.work_order(&token, "WO-20", &product, "1").await;
    let (warehouse, location) = app.storage(&token, "WH-01", "A-01").await;
    let (other_warehouse, _) = app.storage(&token, "WH-02", "B-01").await;

    let consumption = app
        .create(
            &token,
            "/api/material-consumptions",
            json!({
                "work_order_id": order, "material_id": plank, "warehouse_id": warehouse,
                "location_id": location, "quantity": "5", "consumption_date": "2026-05-01T10:00:00Z"
            }),
        )
        .await;
    assert_eq!(consumption["quantity"], "5");
    assert_eq!(consumption["location_id"].as_str().unwrap(), location);

    app.create(
        &token,
        "/api/material-consumptions",
        json!({ "work_order_id": order, "material_id": plank, "warehouse_id": other_warehouse, "quantity": "2" }),
    )
    .await;

    for body in [
        json!({ "work_order_id": order, "material_id": plank, "warehouse_id": warehouse, "quantity": "0" }),
        json!({ "work_order_id": order, "material_id": plank, "warehouse_id": other_warehouse, "location_id": location, "quantity": "1" }),
        json!({ "work_order_id": MISSING, "material_id": plank, "warehouse_id": warehouse, "quantity": "1" }),
        json!({ "work_order_id": order, "material_id": MISSING, "warehouse_id": warehouse, "quantity": "1" }),
        json!({ "work_order_id": order, "material_id": plank, "warehouse_id": MISSING, "quantity": "1" }),
    ] {
        let (status, problem) = app.call("POST", "/api/material-consumptions", &token, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", problem);
    }

    let uri = format!("/api/material-consumptions/{}", id_of(&consumption));
    let (status, updated) = app
        .call("PUT", &uri, &token, Some(json!({ "quantity": "4.5", "notes": "recounted" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], "4.5");
    assert_eq!(updated["warehouse_id"].as_str().unwrap(), warehouse);

    let (status, _) = app.call("DELETE", &uri, &token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, deleted) = app.call("GET", "/api/material-consumptions/deleted", &token, None).await;
    assert_eq!(deleted["total"], 1);
}

#[tokio::test]
async fn test_work_order_edit_keeps_posted_progress() {
    let app = TestApp::new();
    let token = app.token(&["*"]);
    let product = app.material(&token, "SEAT").await;
    let order_id = app.work_order(&token, "WO-300", &product, "10").await;
    let order_uri = format!("/api/work-orders/{}", order_id);

    let (status, _) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({ "order_number": "WO-300", "product_material_id": product, "planned_quantity": "10", "status": "Released" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    app.create(
        &token,
        "/api/production-confirmations",
        json!({ "confirmation_number": "PC-300", "work_order_id": order_id, "confirmed_quantity": "4", "scrap_quantity": "1" }),
    )
    .await;
    let (_, confirmed) = app.call("GET", &order_uri, &token, None).await;

    // 编辑计划字段时不回写过账维护的列
    let (status, edited) = app
        .call(
            "PUT",
            &order_uri,
            &token,
            Some(json!({
                "order_number": "WO-300",
                "product_material_id": product,
                "planned_quantity": "12",
                "priority": 2,
                "notes": "rush"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", edited);
    assert_eq!(edited["planned_quantity"], "12");
    assert_eq!(edited["notes"], "rush");
    assert_eq!(edited["status"], "InProgress");
    assert_eq!(edited["produced_quantity"], "4");
    assert_eq!(edited["scrap_quantity"], "1");
    assert_eq!(edited["actual_start"], confirmed["actual_start"]);
}
