mod common;

use std::io::Write;

use flate2::{write::GzEncoder, Compression};
use serde_json::json;
use twitter_rest::{
    ApiClient, ListRef, LookupOptions, SearchOptions, TimelineOptions, TwitterError,
    UpdateOptions, User, UserRef,
};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{anonymous_client, config, credentials, request_bodies, signed_client, status, user};

#[tokio::test]
async fn invalid_counts_are_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let client = signed_client(&server);

    let too_many = TimelineOptions {
        count: Some(201u32.into()),
        ..TimelineOptions::default()
    };
    let user = UserRef::screen_name("twitterapi");
    let err = client
        .user_timeline(Some(&user), &too_many)
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(ref m) if m.contains("200")));

    let not_a_number = TimelineOptions {
        count: Some("abc".into()),
        ..TimelineOptions::default()
    };
    let err = client
        .user_timeline(Some(&user), &not_a_number)
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(_)));

    let err = client.retweets(1u64, Some(101u32.into()), None).await.unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(_)));
}

#[tokio::test]
async fn writes_and_private_reads_need_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let client = anonymous_client(&server);

    let err = client
        .home_timeline(&TimelineOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::AuthenticationRequired));

    let err = client
        .post_update("hi", &UpdateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::AuthenticationRequired));

    assert!(matches!(
        client.create_favorite(1u64, None).await,
        Err(TwitterError::AuthenticationRequired)
    ));
    assert!(client.friend_ids(None, &Default::default()).is_err());
}

#[tokio::test]
async fn error_objects_become_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/mentions_timeline.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Not authorized"})),
        )
        .mount(&server)
        .await;

    let err = signed_client(&server)
        .mentions(&TimelineOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::Api { code: None, ref message } if message == "Not authorized"));
}

#[tokio::test]
async fn unknown_users_lookup_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/users/lookup.json"))
        .and(query_param("screen_name", "nobody,noone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"code": 34, "message": "Sorry, that page does not exist"}]
        })))
        .mount(&server)
        .await;

    let opts = LookupOptions {
        screen_names: vec!["nobody".into(), "noone".into()],
        ..LookupOptions::default()
    };
    let users = signed_client(&server).users_lookup(&opts).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn rejected_credentials_verify_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"code": 89, "message": "Invalid or expired token."}]
        })))
        .mount(&server)
        .await;

    let verified = signed_client(&server).verify_credentials().await.unwrap();
    assert!(verified.is_none());
}

#[tokio::test]
async fn accepted_credentials_verify_to_the_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user(38895958, "theSeanCook")))
        .mount(&server)
        .await;

    let me = signed_client(&server)
        .verify_credentials()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(me.screen_name.as_deref(), Some("theSeanCook"));
}

#[tokio::test]
async fn post_update_sends_a_signed_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .and(header_exists("authorization"))
        .and(body_string_contains("status=Maybe%20he%27ll%20finally%20find%20his%20keys."))
        .and(body_string_contains("in_reply_to_status_id=7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(8, "Maybe he'll finally find his keys.")))
        .expect(1)
        .mount(&server)
        .await;

    let opts = UpdateOptions {
        in_reply_to_status_id: Some(7u64.into()),
        ..UpdateOptions::default()
    };
    let posted = signed_client(&server)
        .post_update("Maybe he'll finally find his keys.", &opts)
        .await
        .unwrap();
    assert_eq!(posted.id, Some(8));
}

#[tokio::test]
async fn overlong_updates_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(1, "")))
        .expect(0)
        .mount(&server)
        .await;

    let err = signed_client(&server)
        .post_update(&"x".repeat(141), &UpdateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(_)));
}

#[tokio::test]
async fn long_text_is_posted_in_segments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(9, "part")))
        .expect(2)
        .mount(&server)
        .await;

    let text = "word ".repeat(40);
    let posted = signed_client(&server)
        .post_updates(text.trim(), Some("..."), &UpdateOptions::default())
        .await
        .unwrap();
    assert_eq!(posted.len(), 2);

    let bodies = request_bodies(&server).await;
    assert!(bodies[0].contains("..."));
    assert!(!bodies[1].contains("..."));
}

#[tokio::test]
async fn search_without_term_or_geocode_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statuses": []})))
        .expect(0)
        .mount(&server)
        .await;

    let found = signed_client(&server)
        .search(&SearchOptions::default())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn search_defaults_to_fifteen_mixed_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/search/tweets.json"))
        .and(query_param("q", "rustlang"))
        .and(query_param("count", "15"))
        .and(query_param("result_type", "mixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [status(11, "ferris"), status(12, "crab")],
            "search_metadata": {"count": 15}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = SearchOptions {
        term: Some("rustlang".into()),
        ..SearchOptions::default()
    };
    let found = signed_client(&server).search(&opts).await.unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn trends_are_stamped_with_as_of() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/trends/place.json"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "as_of": "2012-08-24T23:25:43Z",
            "locations": [{"name": "Worldwide", "woeid": 1}],
            "trends": [
                {"name": "#GanaPuntosSi", "query": "%23GanaPuntosSi", "url": "http://twitter.com/search/?q=%23GanaPuntosSi"},
                {"name": "#WordsThatDescribeMe", "query": "%23WordsThatDescribeMe"}
            ]
        }])))
        .mount(&server)
        .await;

    let trends = signed_client(&server).trends_current(None).await.unwrap();
    assert_eq!(trends.len(), 2);
    assert!(trends
        .iter()
        .all(|t| t.timestamp.as_deref() == Some("2012-08-24T23:25:43Z")));
}

#[tokio::test]
async fn source_is_sent_with_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/user_timeline.json"))
        .and(query_param("source", "my-app"))
        .and(query_param("screen_name", "twitterapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([status(5, "hi")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        config(&server)
            .with_credentials(credentials())
            .with_source("my-app"),
    )
    .unwrap();
    let user = UserRef::screen_name("twitterapi");
    let statuses = client
        .user_timeline(Some(&user), &TimelineOptions::default())
        .await
        .unwrap();
    assert_eq!(statuses.len(), 1);
}

#[tokio::test]
async fn destroy_status_posts_to_the_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/destroy/240854986559455234.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(240854986559455234, "gone")))
        .expect(1)
        .mount(&server)
        .await;

    let destroyed = signed_client(&server)
        .destroy_status(240854986559455234u64, None)
        .await
        .unwrap();
    assert_eq!(destroyed.id, Some(240854986559455234));
}

#[tokio::test]
async fn retweet_needs_a_positive_id() {
    let server = MockServer::start().await;
    let err = signed_client(&server)
        .post_retweet(0i64, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(ref m) if m.contains("positive")));
}

#[tokio::test]
async fn create_friendship_can_enable_notifications() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/friendships/create.json"))
        .and(body_string_contains("follow=true"))
        .and(body_string_contains("screen_name=noradio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user(3191321, "noradio")))
        .expect(1)
        .mount(&server)
        .await;

    let friend = signed_client(&server)
        .create_friendship(&UserRef::screen_name("noradio"), true)
        .await
        .unwrap();
    assert_eq!(friend.id, Some(3191321));
}

#[tokio::test]
async fn destroy_friendship_by_screen_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/friendships/destroy.json"))
        .and(body_string_contains("screen_name=noradio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user(3191321, "noradio")))
        .expect(1)
        .mount(&server)
        .await;

    signed_client(&server)
        .destroy_friendship(&UserRef::screen_name("noradio"))
        .await
        .unwrap();
}

#[tokio::test]
async fn lists_are_addressed_by_slug_and_owner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/lists/destroy.json"))
        .and(body_string_contains("slug=team"))
        .and(body_string_contains("owner_screen_name=twitter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 574, "slug": "team", "name": "Team", "mode": "public"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = signed_client(&server)
        .destroy_list(&ListRef::slug("team", UserRef::screen_name("twitter")))
        .await
        .unwrap();
    assert_eq!(list.slug.as_deref(), Some("team"));
}

#[tokio::test]
async fn over_capacity_page_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/show.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string(
            "<html><head><title>Twitter / Over capacity</title></head><body></body></html>",
        ))
        .mount(&server)
        .await;

    let err = signed_client(&server)
        .status(1u64, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::RemoteCapacity));
}

#[tokio::test]
async fn direct_messages_are_posted_to_a_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/direct_messages/new.json"))
        .and(body_string_contains("text=hello"))
        .and(body_string_contains("user_id=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 240136858829479936u64,
            "text": "hello",
            "created_at": "Mon Aug 27 17:21:03 +0000 2012",
            "recipient_id": 42,
            "sender_screen_name": "theseancook"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dm = signed_client(&server)
        .post_direct_message("hello", &UserRef::id(42u64))
        .await
        .unwrap();
    assert_eq!(dm.text.as_deref(), Some("hello"));
}

#[tokio::test]
async fn blank_or_empty_text_posts_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .and(body_string_contains("status=first%20para%20second%20para"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(10, "first para second para")))
        .expect(1)
        .mount(&server)
        .await;
    let client = signed_client(&server);

    let err = client
        .post_updates(" \n ", None, &UpdateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(_)));

    let posted = client
        .post_updates("first para\n\nsecond para", None, &UpdateOptions::default())
        .await
        .unwrap();
    assert_eq!(posted.len(), 1);
}

#[tokio::test]
async fn lookup_of_users_without_ids_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let opts = LookupOptions {
        users: vec![User {
            screen_name: Some("jack".into()),
            ..User::default()
        }],
        ..LookupOptions::default()
    };
    let err = signed_client(&server).users_lookup(&opts).await.unwrap_err();
    assert!(matches!(err, TwitterError::InvalidArgument(_)));
}

fn gzip(body: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn gzip_reads_are_decompressed_and_writes_ask_for_identity() {
    let server = MockServer::start().await;
    let timeline = json!([status(21, "squeezed")]).to_string();
    Mock::given(method("GET"))
        .and(path("/1.1/statuses/home_timeline.json"))
        .and(header("accept-encoding", "gzip"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Encoding", "gzip")
                .insert_header("Content-Type", "application/json")
                .set_body_bytes(gzip(&timeline)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/favorites/create.json"))
        .and(header("accept-encoding", "identity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status(21, "squeezed")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        config(&server)
            .with_credentials(credentials())
            .with_gzip(true),
    )
    .unwrap();

    let statuses = client
        .home_timeline(&TimelineOptions::default())
        .await
        .unwrap();
    assert_eq!(statuses[0].text.as_deref(), Some("squeezed"));

    let liked = client.create_favorite(21u64, None).await.unwrap();
    assert_eq!(liked.id, Some(21));
}
