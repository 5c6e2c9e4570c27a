use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use cardsentry::form::FormVariant;
use cardsentry::{present, ClientConfig, PredictError, PredictionClient, Session, Verdict};
use cardsentry::session::SubmitError;

/// Serves a fixed `/predict` response on an ephemeral port and returns the
/// endpoint URL. Stands in for the Flask demo backend.
async fn stub_predict(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/predict",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/predict")
}

fn client_for(endpoint: String) -> PredictionClient {
    PredictionClient::new(&ClientConfig {
        endpoint,
        timeout_secs: 5,
    })
    .unwrap()
}

fn business_session(endpoint: String) -> Session {
    let mut session = Session::new(client_for(endpoint), FormVariant::BusinessFields);
    let form = session.form_mut();
    form.set("amount", "2125.87").unwrap();
    form.set("transaction_type", "online").unwrap();
    form.set("merchant_category", "travel").unwrap();
    form.set("card_type", "prepaid").unwrap();
    form.set("transaction_location", "international").unwrap();
    form.set("customer_age", "22").unwrap();
    session
}

#[tokio::test]
async fn fraudulent_verdict_with_confidence() {
    let endpoint = stub_predict(
        StatusCode::OK,
        json!({"prediction": 1, "probability": [0.2, 0.8], "threshold": 0.5}),
    )
    .await;

    let mut session = business_session(endpoint);
    let result = session.submit().await.unwrap().clone();
    let assessment = present::assess(&result);
    assert_eq!(assessment.verdict, Verdict::Fraudulent);
    assert_eq!(assessment.confidence, Some(80));
}

#[tokio::test]
async fn legitimate_verdict_with_confidence() {
    let endpoint = stub_predict(
        StatusCode::OK,
        json!({"prediction": 0, "probability": [0.95, 0.05]}),
    )
    .await;

    let mut session = business_session(endpoint);
    let result = session.submit().await.unwrap().clone();
    let assessment = present::assess(&result);
    assert_eq!(assessment.verdict, Verdict::Legitimate);
    assert_eq!(assessment.confidence, Some(95));
}

#[tokio::test]
async fn error_body_on_http_200_is_a_failure() {
    let endpoint = stub_predict(StatusCode::OK, json!({"error": "model unavailable"})).await;

    let mut session = business_session(endpoint);
    match session.submit().await {
        Err(SubmitError::Predict(PredictError::Backend(message))) => {
            assert_eq!(message, "model unavailable");
        }
        other => panic!("expected a backend failure, got {other:?}"),
    }
    // No verdict is available after a failure.
    assert!(session.result().is_none());
}

#[tokio::test]
async fn non_2xx_status_is_a_failure_with_the_code() {
    let endpoint = stub_predict(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "boom"}),
    )
    .await;

    let mut session = business_session(endpoint);
    match session.submit().await {
        Err(SubmitError::Predict(PredictError::Status(code))) => assert_eq!(code, 500),
        other => panic!("expected an HTTP status failure, got {other:?}"),
    }
    assert!(session.result().is_none());
}

#[tokio::test]
async fn probability_not_covering_prediction_is_rejected() {
    let endpoint = stub_predict(
        StatusCode::OK,
        json!({"prediction": 1, "probability": [0.4]}),
    )
    .await;

    let mut session = business_session(endpoint);
    match session.submit().await {
        Err(SubmitError::Predict(PredictError::Shape(_))) => {}
        other => panic!("expected a shape failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_probability_still_yields_a_verdict() {
    let endpoint = stub_predict(StatusCode::OK, json!({"prediction": 1})).await;

    let mut session = business_session(endpoint);
    let result = session.submit().await.unwrap().clone();
    let assessment = present::assess(&result);
    assert_eq!(assessment.verdict, Verdict::Fraudulent);
    assert_eq!(assessment.confidence, None);
}

#[tokio::test]
async fn request_payload_carries_json_numbers() {
    // The stub only answers success when the payload has the agreed shape,
    // so a passing test proves the client sent numbers, not strings.
    let app = Router::new().route(
        "/predict",
        post(|Json(body): Json<Value>| async move {
            let well_formed = body["amount"].is_number()
                && body["customer_age"].is_number()
                && body["transaction_type"].is_string();
            if well_formed {
                Json(json!({"prediction": 0, "probability": [0.9, 0.1]}))
            } else {
                Json(json!({"error": "bad payload"}))
            }
        }),
    );
    let endpoint = serve(app).await;

    let mut session = business_session(endpoint);
    let result = session.submit().await.unwrap();
    assert_eq!(result.prediction, 0);
}

#[tokio::test]
async fn reset_after_a_result_clears_everything() {
    let endpoint = stub_predict(
        StatusCode::OK,
        json!({"prediction": 0, "probability": [0.9, 0.1]}),
    )
    .await;

    let mut session = business_session(endpoint);
    session.submit().await.unwrap();
    assert!(session.result().is_some());

    session.reset();
    assert!(session.result().is_none());
    assert_eq!(session.form().get("amount"), "");
    assert_eq!(session.form().get("transaction_type"), "");
    assert!(session.form().errors().is_empty());
}
