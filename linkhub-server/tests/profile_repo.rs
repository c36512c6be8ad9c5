//! ProfileRepository behaviour, run against every backend

#[macro_use]
mod common;

use common::scalar;
use linkhub_core::{ImageShape, ProfileDraft, ProfileInput, SocialLink};
use linkhub_server::db::{DbPool, Repositories};

fn social(id: &str, platform: &str, url: &str) -> SocialLink {
    SocialLink {
        id: id.into(),
        platform: platform.into(),
        url: url.into(),
    }
}

fn input(draft: ProfileDraft) -> ProfileInput {
    ProfileInput::try_from(draft).unwrap()
}

async fn empty_table_has_no_profile(_pool: &DbPool, repos: &Repositories) {
    assert!(repos.profiles.get().await.unwrap().is_none());
}

async fn save_twice_keeps_only_the_latest(pool: &DbPool, repos: &Repositories) {
    let first = input(ProfileDraft {
        name: "First".into(),
        role: Some("Drafter".into()),
        social_links: vec![social("1", "github", "https://github.com/first")],
        ..Default::default()
    });
    assert!(repos.profiles.save(&first).await.unwrap());

    let links = vec![
        social("2", "mastodon", "https://example.social/@second"),
        social("1", "github", "https://github.com/second"),
    ];
    let second = input(ProfileDraft {
        name: "Second".into(),
        bio: Some("Writes things".into()),
        email: Some("second@example.com".into()),
        image_shape: Some(ImageShape::Portrait),
        image_position: Some(35),
        social_links: links.clone(),
        ..Default::default()
    });
    assert!(repos.profiles.save(&second).await.unwrap());

    assert_eq!(scalar(pool, "SELECT COUNT(*) FROM profiles").await, 1);

    let stored = repos.profiles.get().await.unwrap().expect("profile exists");
    assert_eq!(stored.name, "Second");
    assert_eq!(stored.role, None);
    assert_eq!(stored.bio.as_deref(), Some("Writes things"));
    assert_eq!(stored.email.as_deref(), Some("second@example.com"));
    assert_eq!(stored.image_shape, Some(ImageShape::Portrait));
    assert_eq!(stored.image_position, Some(35));
    // order is preserved
    assert_eq!(stored.social_links, links);
}

async fn profile_without_social_links_reads_back_empty(_pool: &DbPool, repos: &Repositories) {
    let minimal = input(ProfileDraft {
        name: "Minimal".into(),
        ..Default::default()
    });
    repos.profiles.save(&minimal).await.unwrap();

    let stored = repos.profiles.get().await.unwrap().unwrap();
    assert!(stored.social_links.is_empty());
    assert_eq!(stored.image_shape, None);
}

backend_tests!(
    empty_table_has_no_profile,
    save_twice_keeps_only_the_latest,
    profile_without_social_links_reads_back_empty,
);

mod legacy_rows {
    use super::*;
    use linkhub_core::Profile;

    async fn insert_raw(pool: &DbPool, social_links: Option<&str>, image_shape: Option<&str>) {
        let DbPool::Sqlite(p) = pool else {
            unreachable!()
        };
        sqlx::query("INSERT INTO profiles (name, image_shape, social_links) VALUES ('Legacy', ?, ?)")
            .bind(image_shape)
            .bind(social_links)
            .execute(p)
            .await
            .unwrap();
    }

    async fn read(social_links: Option<&str>) -> Profile {
        let (pool, repos) = common::sqlite().await;
        insert_raw(&pool, social_links, None).await;
        repos.profiles.get().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn null_social_links_decode_to_empty() {
        assert!(read(None).await.social_links.is_empty());
    }

    #[tokio::test]
    async fn double_encoded_social_links_decode() {
        let encoded = serde_json::to_string(
            r#"[{"id":"1","platform":"x","url":"https://x.example/me"}]"#,
        )
        .unwrap();
        let profile = read(Some(&encoded)).await;
        assert_eq!(
            profile.social_links,
            vec![social("1", "x", "https://x.example/me")]
        );
    }

    #[tokio::test]
    async fn unknown_image_shape_is_reported() {
        let (pool, repos) = common::sqlite().await;
        insert_raw(&pool, None, Some("hexagon")).await;

        let err = repos.profiles.get().await.unwrap_err();
        assert!(err.to_string().contains("image_shape"));
    }
}
