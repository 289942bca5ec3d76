//! Tests for the login flow handlers.

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use chrono::Utc;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::{Role, SessionToken, User, UserId};
use crate::inbound::http::test_utils::{
    TestPorts, login_cookie, session_cookie, sign_in_route, test_session_middleware,
};

fn admin_user() -> User {
    User {
        id: UserId::random(),
        username: "admin".into(),
        password_hash: "$argon2id$stub".into(),
        role: Role::Admin,
        user_type: UserType::Admin,
        name: "System Administrator".into(),
        email: "admin@bamidele.edu.ng".into(),
        student_id: None,
        department: "IT Department".into(),
        profile_photo: None,
        registration_photo: None,
        created_at: Utc::now(),
        extra: serde_json::Map::new(),
    }
}

macro_rules! app {
    ($ports:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ports.into_state()))
                .wrap(test_session_middleware())
                .route("/sign-in", web::get().to(sign_in_route))
                .service(index)
                .service(login_form)
                .service(login)
                .service(logout),
        )
        .await
    };
}

fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

fn login_request(username: &str, password: &str, user_type: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/login")
        .set_form(LoginForm {
            username: username.into(),
            password: password.into(),
            user_type: user_type.into(),
        })
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn successful_login_sets_cookie_and_redirects_to_dashboard() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .returning(|creds| {
            assert_eq!(creds.user_type(), "admin");
            Ok(admin_user())
        });
    ports
        .sessions
        .expect_establish()
        .times(1)
        .returning(|_| Ok(SessionToken::new("fresh")));
    let app = app!(ports);

    let res = test::call_service(&app, login_request("admin", "admin123", "admin")).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard");
    assert!(session_cookie(&res).is_some());
}

#[rstest]
#[actix_web::test]
async fn rejected_credentials_redirect_back_with_error() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    ports.sessions.expect_establish().never();
    let app = app!(ports);

    let res = test::call_service(&app, login_request("admin", "wrong", "student")).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?error=invalid_credentials");
    assert!(session_cookie(&res).is_none());
}

#[rstest]
#[case("", "admin123", "username")]
#[case("admin", "", "password")]
#[actix_web::test]
async fn empty_fields_are_invalid_requests(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let mut ports = TestPorts::default();
    ports.login.expect_authenticate().never();
    let app = app!(ports);

    let res = test::call_service(&app, login_request(username, password, "admin")).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn storage_failures_during_login_are_server_errors() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::internal("user repository error")));
    let app = app!(ports);

    let res = test::call_service(&app, login_request("admin", "admin123", "admin")).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[actix_web::test]
async fn login_form_lists_user_types_and_echoes_error() {
    let app = app!(TestPorts::default());

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login?error=invalid_credentials")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["userTypes"], serde_json::json!(["admin", "student", "staff"]));
    assert_eq!(body["error"], "invalid_credentials");
}

#[rstest]
#[case(None, "/login")]
#[case(Some(Role::User), "/dashboard")]
#[actix_web::test]
async fn index_redirects_by_session_state(#[case] signed_in: Option<Role>, #[case] target: &str) {
    let ports = match signed_in {
        Some(role) => TestPorts::default().signed_in_as(role),
        None => TestPorts::default(),
    };
    let app = app!(ports);
    let mut req = test::TestRequest::get().uri("/");
    if signed_in.is_some() {
        req = req.cookie(login_cookie(&app).await);
    }

    let res = test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), target);
}

#[rstest]
#[actix_web::test]
async fn index_treats_dead_token_as_logged_out() {
    let mut ports = TestPorts::default();
    ports.sessions.expect_resolve().returning(|_| Ok(None));
    let app = app!(ports);
    let cookie = login_cookie(&app).await;

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/").cookie(cookie).to_request())
            .await;

    assert_eq!(location(&res), "/login");
}

#[rstest]
#[actix_web::test]
async fn logout_destroys_the_server_session() {
    let mut ports = TestPorts::default();
    ports
        .sessions
        .expect_destroy()
        .times(1)
        .returning(|token| {
            assert_eq!(token.as_str(), crate::inbound::http::test_utils::TEST_TOKEN);
            Ok(())
        });
    let app = app!(ports);
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    let cleared = session_cookie(&res).expect("removal cookie");
    assert_eq!(cleared.value(), "");
}

#[rstest]
#[actix_web::test]
async fn logout_without_session_still_redirects() {
    let mut ports = TestPorts::default();
    ports.sessions.expect_destroy().never();
    let app = app!(ports);

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;

    assert_eq!(location(&res), "/login");
}
