mod common;

use bookings_server::db::repository::DatabaseRepo;
use common::{TestClient, body_string, location};
use http::StatusCode;
use shared::models::Reservation;
use shared::util::parse_date;

async fn seed_reservation(client: &TestClient, last_name: &str, start: &str, end: &str) -> i64 {
    let mut r = Reservation::pending(parse_date(start).unwrap(), parse_date(end).unwrap());
    r.first_name = "Jane".into();
    r.last_name = last_name.into();
    r.email = "jane@example.com".into();
    r.room_id = 1;
    client
        .repo
        .insert_reservation_with_restriction(&r)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_admin_requires_login() {
    let mut client = TestClient::new();
    let resp = client.get("/admin/dashboard").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/user/login");

    let body = client.page("/user/login").await;
    assert!(body.contains("Log in first!"));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let mut client = TestClient::new();
    let resp = client
        .post_form(
            "/user/login",
            &[("email", "admin@admin.com"), ("password", "nope")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/user/login");

    let body = client.page("/user/login").await;
    assert!(body.contains("Invalid login credentials"));
    assert_eq!(client.get("/admin/dashboard").await.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_form_validation() {
    let mut client = TestClient::new();
    let resp = client
        .post_form("/user/login", &[("email", "not-an-email")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("This field cannot be blank"));
}

#[tokio::test]
async fn test_login_and_logout() {
    let mut client = TestClient::new();
    client.login().await;

    let home = client.page("/").await;
    assert!(home.contains("Logged in successfully"));
    assert!(home.contains("/admin/dashboard"));

    client.page("/admin/dashboard").await;

    let resp = client.get("/user/logout").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/user/login");
    assert_eq!(client.get("/admin/dashboard").await.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_reservation_lists_and_processing() {
    let mut client = TestClient::new();
    let later = seed_reservation(&client, "Later", "2050-05-10", "2050-05-12").await;
    let earlier = seed_reservation(&client, "Earlier", "2050-05-01", "2050-05-03").await;
    client.login().await;

    let body = client.page("/admin/reservations-all").await;
    let (e, l) = (body.find("Earlier").unwrap(), body.find("Later").unwrap());
    assert!(e < l, "ordered by arrival");

    let resp = client
        .get(&format!("/admin/process-reservation/new/{earlier}"))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/reservations-new");

    let body = client.page("/admin/reservations-new").await;
    assert!(body.contains("Reservation marked as processed"));
    assert!(!body.contains("Earlier"));
    assert!(body.contains(&format!("/admin/reservations/new/{later}/show")));

    let body = client.page(&format!("/admin/reservations/all/{earlier}/show")).await;
    assert!(body.contains("<strong>Status:</strong> Processed"));
    assert!(!body.contains("Mark as Processed"));
}

#[tokio::test]
async fn test_show_edit_and_delete_reservation() {
    let mut client = TestClient::new();
    let id = seed_reservation(&client, "Doe", "2050-06-01", "2050-06-02").await;
    client.login().await;

    let body = client.page(&format!("/admin/reservations/all/{id}/show")).await;
    assert!(body.contains(r#"value="Doe""#));
    assert!(body.contains("<strong>Nights:</strong> 1"));
    assert!(body.contains("<strong>Status:</strong> New"));
    assert!(body.contains("Mark as Processed"));

    let resp = client
        .post_form(
            &format!("/admin/reservations/all/{id}"),
            &[
                ("first_name", "Janet"),
                ("last_name", "Doe"),
                ("email", "janet@example.com"),
                ("phone", "555"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/reservations-all");
    let updated = client.repo.get_reservation_by_id(id).await.unwrap();
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.email, "janet@example.com");

    let resp = client
        .post_form(
            &format!("/admin/reservations/all/{id}"),
            &[("first_name", "Janet"), ("last_name", ""), ("email", "bad")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("Invalid email address"));

    let resp = client
        .get(&format!("/admin/delete-reservation/all/{id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(client.repo.reservation_count(), 0);
    assert_eq!(client.repo.restriction_count(), 0);

    let resp = client.get(&format!("/admin/reservations/all/{id}/show")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_calendar_block_and_unblock() {
    let mut client = TestClient::new();
    let id = seed_reservation(&client, "Guest", "2050-01-10", "2050-01-12").await;
    client.login().await;

    let body = client.page("/admin/reservations-calendar?y=2050&m=1").await;
    assert!(body.contains("January 2050"));
    assert!(body.contains(&format!("/admin/reservations/cal/{id}/show?y=2050&m=1")));
    assert!(body.contains("add_block_2_2050-01-05"));

    let resp = client
        .post_form(
            "/admin/reservations-calendar",
            &[("y", "2050"), ("m", "1"), ("add_block_2_2050-01-05", "1")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/reservations-calendar?y=2050&m=1");

    let from = parse_date("2050-01-01").unwrap();
    let to = parse_date("2050-01-31").unwrap();
    let blocks = client.repo.get_restrictions(2, from, to).await.unwrap();
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_owner_block());

    let body = client.page("/admin/reservations-calendar?y=2050&m=1").await;
    let shown = format!("shown_block_2_{}", blocks[0].id);
    let keep = format!("remove_block_2_{}", blocks[0].id);
    assert!(body.contains(&shown));
    assert!(body.contains(&keep));

    // Block still ticked: kept
    client
        .post_form(
            "/admin/reservations-calendar",
            &[
                ("y", "2050"),
                ("m", "1"),
                (shown.as_str(), "1"),
                (keep.as_str(), "2050-01-05"),
            ],
        )
        .await;
    assert_eq!(client.repo.get_restrictions(2, from, to).await.unwrap().len(), 1);

    // Box unticked: removed, guest reservation untouched
    client
        .post_form(
            "/admin/reservations-calendar",
            &[("y", "2050"), ("m", "1"), (shown.as_str(), "1")],
        )
        .await;
    assert!(client.repo.get_restrictions(2, from, to).await.unwrap().is_empty());
    assert_eq!(client.repo.get_restrictions(1, from, to).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_calendar_save_keeps_block_under_reservation() {
    let mut client = TestClient::new();
    let day = parse_date("2050-01-10").unwrap();
    client.repo.insert_block_for_room(1, day).await.unwrap();
    let id = seed_reservation(&client, "Overlap", "2050-01-09", "2050-01-12").await;
    client.login().await;

    let from = parse_date("2050-01-01").unwrap();
    let to = parse_date("2050-01-31").unwrap();
    let block_id = client
        .repo
        .get_restrictions(1, from, to)
        .await
        .unwrap()
        .into_iter()
        .find(|rr| rr.is_owner_block())
        .map(|rr| rr.id)
        .unwrap();

    let body = client.page("/admin/reservations-calendar?y=2050&m=1").await;
    assert!(body.contains(&format!("/admin/reservations/cal/{id}/show")));
    assert!(body.contains(&format!("remove_block_1_{block_id}")));

    // A save that never saw the block leaves it alone
    client
        .post_form("/admin/reservations-calendar", &[("y", "2050"), ("m", "1")])
        .await;
    let owner_blocks = client
        .repo
        .get_restrictions(1, from, to)
        .await
        .unwrap()
        .into_iter()
        .filter(|rr| rr.is_owner_block())
        .count();
    assert_eq!(owner_blocks, 1);
}
