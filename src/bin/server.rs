use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use fabric_layout::ingest::{DEFAULT_REMARK_COLUMN, normalized_order, parse_orders, remarks_from_csv};
use fabric_layout::{LayoutConfig, LayoutResult, Material, Order};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct LayoutRequest {
    /// Raw seller remarks, one order each.
    #[serde(default)]
    remarks: Vec<String>,
    #[serde(default)]
    orders: Vec<Order>,
    /// Order sheet exported as CSV text.
    #[serde(default)]
    sheet: Option<String>,
    /// Column of `sheet` holding the remarks.
    #[serde(default = "default_column")]
    column: String,
    /// Material kept from `remarks` and `sheet`; `"all"` keeps every material.
    #[serde(default = "default_material")]
    material: String,
    #[serde(default)]
    config: LayoutConfig,
}

fn default_material() -> String {
    "PVC".to_string()
}

fn default_column() -> String {
    DEFAULT_REMARK_COLUMN.to_string()
}

fn material_filter(name: &str) -> Result<Option<Material>, String> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    name.parse().map(Some)
}

async fn layout(
    Json(req): Json<LayoutRequest>,
) -> Result<Json<LayoutResult>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /layout"
    );

    req.config
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let filter = material_filter(&req.material).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let mut orders: Vec<Order> = req
        .orders
        .into_iter()
        .map(|o| normalized_order(o.material, &o.remark, o.width, o.length))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    orders.extend(parse_orders(req.remarks.iter().map(String::as_str), filter));
    if let Some(sheet) = &req.sheet {
        let remarks = remarks_from_csv(sheet.as_bytes(), &req.column)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        orders.extend(parse_orders(remarks.iter().map(String::as_str), filter));
    }

    if orders.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "no orders with a recognizable size".to_string(),
        ));
    }

    let config = req.config;
    let result = tokio::task::spawn_blocking(move || config.find_best_layout(&orders))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(result))
}

fn app(static_dir: &str) -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/layout", post(layout))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init(sentry::ClientOptions {
            dsn: dsn.parse().ok(),
            release: sentry::release_name!(),
            ..Default::default()
        })
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());
    let app = app(&static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn test_material_filter() {
        assert_eq!(material_filter("all").unwrap(), None);
        assert_eq!(material_filter("PVC").unwrap(), Some(Material::Pvc));
        assert_eq!(material_filter("pvc").unwrap(), Some(Material::Pvc));
        assert_eq!(material_filter("leather").unwrap(), Some(Material::Leather));
        assert!(material_filter("silk").is_err());
    }

    #[test]
    fn test_request_defaults() {
        let req: LayoutRequest = serde_json::from_str(r#"{"remarks": ["pvc 35*120"]}"#).unwrap();
        assert_eq!(req.material, "PVC");
        assert_eq!(req.config, LayoutConfig::default());
        assert!(req.orders.is_empty());
        assert!(req.sheet.is_none());
        assert_eq!(req.column, "卖家备注");
    }

    #[tokio::test]
    async fn test_layout_handler_reads_sheet_column() {
        let req = LayoutRequest {
            remarks: Vec::new(),
            orders: Vec::new(),
            sheet: Some("下单日期,卖家备注\n2024-01-05,pvc 35*120\n2024-01-06,备用\n".to_string()),
            column: default_column(),
            material: default_material(),
            config: LayoutConfig::default(),
        };
        let Json(result) = layout(Json(req)).await.unwrap();
        assert_eq!(result.placed_count(), 1);
        let placed = &result.materials[&Material::Pvc][0].placed_orders[0];
        assert_eq!((placed.order.width, placed.order.length), (35.0, 120.0));
    }

    #[tokio::test]
    async fn test_layout_handler_rejects_unknown_column() {
        let req: LayoutRequest =
            serde_json::from_str(r#"{"sheet": "备注\npvc 35*120\n"}"#).unwrap();
        let Err((status, message)) = layout(Json(req)).await else {
            panic!("sheet without the remark column accepted");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("卖家备注"));
    }

    #[tokio::test]
    async fn test_static_files_served_from_fallback() {
        let dir = std::env::temp_dir().join(format!("fabric_layout_static_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>layout</h1>").unwrap();

        let app = app(dir.to_str().unwrap());
        let resp = app
            .clone()
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>layout</h1>");

        let resp = app
            .oneshot(Request::get("/up").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_layout_handler_places_remarks() {
        let req: LayoutRequest = serde_json::from_str(
            r#"{"remarks": ["pvc 35*120", "pvc 120*60", "皮革 10x10"], "config": {"fabricWidths": [140]}}"#,
        )
        .unwrap();
        let Json(result) = layout(Json(req)).await.unwrap();
        assert_eq!(result.placed_count(), 2);
        assert!(result.materials.contains_key(&Material::Pvc));
    }

    #[tokio::test]
    async fn test_layout_handler_rejects_bad_order() {
        let req: LayoutRequest = serde_json::from_str(
            r#"{"orders": [{"material": "PVC", "width": -1, "length": 10}]}"#,
        )
        .unwrap();
        let Err((status, _)) = layout(Json(req)).await else {
            panic!("negative width accepted");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
