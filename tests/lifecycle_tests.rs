mod test_utils;

use chrono::{DateTime, Duration, Utc};
use test_utils::{new_post, TestDb};

use photowall_backend::{
    entities::post::{NewPostRequest, PostStatus},
    errors::AppError,
};

#[actix_rt::test]
async fn empty_title_is_rejected_without_a_write() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let err = lifecycle.create_post(new_post("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(lifecycle.list_posts().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn missing_display_time_defaults_to_now() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let before = Utc::now();
    let created = lifecycle.create_post(new_post("Untimed")).await.unwrap();
    let after = Utc::now();

    let post = lifecycle.get_post(&created.slug).await.unwrap();
    assert!(post.display_time >= before && post.display_time <= after);
}

#[actix_rt::test]
async fn zero_display_time_defaults_to_now() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle
        .create_post(NewPostRequest {
            title: "Epoch".to_string(),
            display_time: Some(DateTime::<Utc>::UNIX_EPOCH),
        })
        .await
        .unwrap();

    let post = lifecycle.get_post(&created.slug).await.unwrap();
    assert!(post.display_time > Utc::now() - Duration::minutes(1));
}

#[actix_rt::test]
async fn explicit_display_time_is_kept() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let when = Utc::now() - Duration::days(7);
    let created = lifecycle
        .create_post(NewPostRequest {
            title: "Backdated".to_string(),
            display_time: Some(when),
        })
        .await
        .unwrap();

    let post = lifecycle.get_post(&created.slug).await.unwrap();
    assert_eq!(post.display_time.timestamp(), when.timestamp());
}

#[actix_rt::test]
async fn unknown_status_is_rejected_before_the_store_is_touched() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Statusful")).await.unwrap();

    let err = lifecycle.update_status(&created.slug, "archived").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let post = lifecycle.get_post(&created.slug).await.unwrap();
    assert_eq!(post.status, PostStatus::Draft);
}

#[actix_rt::test]
async fn publish_then_unpublish_round_trips() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Toggle")).await.unwrap();

    lifecycle.update_status(&created.slug, "published").await.unwrap();
    assert_eq!(lifecycle.list_published().await.unwrap().len(), 1);

    lifecycle.update_status(&created.slug, "draft").await.unwrap();
    assert!(lifecycle.list_published().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn display_time_zero_value_is_rejected_on_update() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Timed")).await.unwrap();
    let err = lifecycle
        .update_display_time(&created.slug, DateTime::<Utc>::UNIX_EPOCH)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[actix_rt::test]
async fn attach_uses_request_order_as_position() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Gallery")).await.unwrap();
    let post = lifecycle.get_post(&created.slug).await.unwrap();

    let a = db.register_image("/uploads/2024/06/a.jpg").await;
    let b = db.register_image("/uploads/2024/06/b.jpg").await;
    let c = db.register_image("/uploads/2024/06/c.jpg").await;

    lifecycle
        .attach_images(
            &created.slug,
            &[
                "/uploads/2024/06/a.jpg".to_string(),
                "/uploads/2024/06/b.jpg".to_string(),
                "/uploads/2024/06/c.jpg".to_string(),
            ],
        )
        .await
        .unwrap();

    assert_eq!(db.attachments(post.id).await, vec![(a, 0), (b, 1), (c, 2)]);
}

#[actix_rt::test]
async fn reattaching_a_single_url_resets_only_that_position() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Reorder")).await.unwrap();
    let post = lifecycle.get_post(&created.slug).await.unwrap();

    let a = db.register_image("/uploads/2024/06/a.jpg").await;
    let b = db.register_image("/uploads/2024/06/b.jpg").await;
    let c = db.register_image("/uploads/2024/06/c.jpg").await;

    lifecycle
        .attach_images(
            &created.slug,
            &[
                "/uploads/2024/06/a.jpg".to_string(),
                "/uploads/2024/06/b.jpg".to_string(),
                "/uploads/2024/06/c.jpg".to_string(),
            ],
        )
        .await
        .unwrap();

    // A later request repositions only the urls it names.
    lifecycle
        .attach_images(&created.slug, &["/uploads/2024/06/c.jpg".to_string()])
        .await
        .unwrap();

    assert_eq!(db.attachments(post.id).await, vec![(a, 0), (b, 1), (c, 0)]);
}

#[actix_rt::test]
async fn attach_with_no_urls_is_rejected() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Empty Batch")).await.unwrap();
    let err = lifecycle.attach_images(&created.slug, &[]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[actix_rt::test]
async fn attach_to_missing_post_is_not_found() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let err = lifecycle
        .attach_images("missing", &["/uploads/2024/06/a.jpg".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn attach_commits_successes_and_reports_failures() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Mixed Batch")).await.unwrap();
    let post = lifecycle.get_post(&created.slug).await.unwrap();

    let a = db.register_image("/uploads/2024/06/a.jpg").await;

    let err = lifecycle
        .attach_images(
            &created.slug,
            &[
                "/uploads/2024/06/a.jpg".to_string(),
                "/uploads/2024/06/ghost.jpg".to_string(),
            ],
        )
        .await
        .unwrap_err();

    match err {
        AppError::PartialFailure(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].contains("/uploads/2024/06/ghost.jpg"));
        }
        other => panic!("expected PartialFailure, got {:?}", other),
    }

    // The resolvable url was attached despite the batch error.
    assert_eq!(db.attachments(post.id).await, vec![(a, 0)]);
}

#[actix_rt::test]
async fn draft_to_wall_scenario() {
    let db = TestDb::spawn().await;
    let lifecycle = db.lifecycle();

    let created = lifecycle.create_post(new_post("Summer BBQ 2024!")).await.unwrap();
    assert_eq!(created.slug, "summer-bbq-2024");
    assert!(lifecycle.list_published().await.unwrap().is_empty());

    db.register_image("/uploads/2024/06/grill.jpg").await;
    db.register_image("/uploads/2024/06/salad.jpg").await;

    lifecycle
        .attach_images(
            &created.slug,
            &[
                "/uploads/2024/06/grill.jpg".to_string(),
                "/uploads/2024/06/salad.jpg".to_string(),
            ],
        )
        .await
        .unwrap();

    lifecycle.update_status(&created.slug, "published").await.unwrap();

    let wall = lifecycle.list_published().await.unwrap();
    assert_eq!(wall.len(), 1);
    assert_eq!(wall[0].title, "Summer BBQ 2024!");
    assert_eq!(
        wall[0].photos,
        vec!["/uploads/2024/06/grill.jpg", "/uploads/2024/06/salad.jpg"]
    );
}
