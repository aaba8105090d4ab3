use assets_manager_backend::{create_router, AppState, DbConnection};
use assets_manager_client::{
    views::{DashboardController, Notice, ParticularsController, ParticularsForm, SettingsController},
    AccountStore, ApiClient, ClientError, EntryStore, Session,
};
use chrono::Duration;
use shared::{CreateEntryRequest, Month, SignInRequest, SignUpRequest, UpdateEntryRequest};

const PASSWORD: &str = "Str0ng!Passw0rd";

async fn start_store() -> ApiClient {
    let db = DbConnection::in_memory().await.expect("Failed to create test database");
    let app = create_router(AppState::new(db, Duration::hours(1)), "http://localhost:8080").unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiClient::with_base_url(format!("http://{}", addr))
}

async fn sign_up_and_in(client: &ApiClient, username: &str) -> Session {
    let email = format!("{}@example.com", username);
    client
        .sign_up(&SignUpRequest {
            email: email.clone(),
            password: PASSWORD.to_string(),
            name: "Test User".to_string(),
            username: username.to_string(),
        })
        .await
        .unwrap();
    client
        .sign_in(&SignInRequest {
            email,
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let client = start_store().await;
    let session = sign_up_and_in(&client, "ana_lima").await;

    let created = client
        .create(
            &session,
            &CreateEntryRequest {
                category: Some("Mutual Fund".to_string()),
                description: Some("Index fund".to_string()),
                amount: Some(2500.0),
                month: Some("March".to_string()),
                year: Some(2024),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let fetched = client.get(&session, &created.id).await.unwrap();
    assert_eq!(fetched.category.name(), "Mutual Fund");
    assert_eq!(fetched.amount, 2500.0);
    assert_eq!(fetched.investment, 2500.0);
    assert_eq!(fetched.cash, 0.0);
    assert_eq!(fetched.month, Month::March);
    assert_eq!(fetched.year, 2024);

    let titles = client.titles(&session).await.unwrap();
    assert_eq!(titles, vec!["Index fund".to_string()]);
}

#[tokio::test]
async fn test_error_kinds_over_http() {
    let client = start_store().await;
    let session = sign_up_and_in(&client, "ana_lima").await;

    let missing_amount = client
        .create(
            &session,
            &CreateEntryRequest {
                category: Some("Gold".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing_amount, Err(ClientError::Validation { ref field, .. }) if field.as_deref() == Some("amount")));

    let not_found = client
        .update(
            &session,
            "does-not-exist",
            &UpdateEntryRequest {
                cash: Some(10.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(not_found, Err(ClientError::NotFound(_))));

    client.sign_out(&session).await.unwrap();
    assert!(matches!(client.list(&session).await, Err(ClientError::Auth(_))));
}

#[tokio::test]
async fn test_clear_all_twice() {
    let client = start_store().await;
    let session = sign_up_and_in(&client, "ana_lima").await;

    for month in ["January", "February"] {
        client
            .create(
                &session,
                &CreateEntryRequest {
                    category: Some("Bank Account".to_string()),
                    amount: Some(1000.0),
                    month: Some(month.to_string()),
                    year: Some(2024),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    assert_eq!(client.clear_all(&session).await.unwrap(), 2);
    assert!(client.list(&session).await.unwrap().is_empty());
    assert_eq!(client.clear_all(&session).await.unwrap(), 0);
    assert!(client.list(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_liquid_form_through_dashboard() {
    let client = start_store().await;
    let session = sign_up_and_in(&client, "ana_lima").await;

    let mut particulars = ParticularsController::new(client.clone(), session.clone());
    for (month, cash) in [(Month::January, 1000.0), (Month::February, 1200.0)] {
        particulars.form = ParticularsForm {
            category: "Bank Account".to_string(),
            title: "Savings".to_string(),
            cash: Some(cash),
            investment: Some(500.0),
            current_value: None,
            month,
            year: 2024,
        };
        let saved = particulars.submit().await.unwrap();
        assert_eq!(saved.investment, 0.0);
        assert_eq!(saved.current_value, cash);
    }

    let mut dashboard = DashboardController::new(client, session);
    dashboard.refresh().await;
    assert!(dashboard.has_data());
    let view = dashboard.state.ready().unwrap();
    assert!((view.summary.monthly_growth - 20.0).abs() < 1e-9);
    assert_eq!(view.summary.total_liquid(), 1200.0);
    assert_eq!(view.summary.total_invested(), 0.0);
}

#[tokio::test]
async fn test_username_conflict_leaves_profile() {
    let client = start_store().await;
    sign_up_and_in(&client, "ana_lima").await;
    let bea = sign_up_and_in(&client, "bea_costa").await;

    let mut settings = SettingsController::new(client, bea);
    settings.load().await;
    assert!(!settings.update_profile(None, Some("ana_lima".to_string())).await);
    assert!(matches!(settings.notice, Some(Notice::Field { ref field, .. }) if field == "username"));

    settings.load().await;
    assert_eq!(settings.state.ready().unwrap().username, "bea_costa");
}
