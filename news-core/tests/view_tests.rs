use news_core::view::{
    format_published, meta_line, resolve_image, ArticleCard, DateStyle, DetailView,
    ImageFailures, ImageSlot, ImageSource, HERO_PLACEHOLDER, MISSING_SUMMARY, READ_MORE,
    THUMBNAIL_PLACEHOLDER,
};
use news_core::Article;

fn article() -> Article {
    Article {
        id: 5,
        title: "Launch window opens".into(),
        summary: "A short summary.".into(),
        image_url: Some("https://img.example.com/launch.jpg".into()),
        url: "https://news.example.com/launch".into(),
        news_site: Some("NASA".into()),
        published_at: Some("2024-10-21T12:00:00Z".into()),
    }
}

#[test]
fn missing_or_invalid_image_falls_back_to_placeholder() {
    let failures = ImageFailures::default();
    for url in [None, Some(""), Some("   "), Some("not a url")] {
        assert_eq!(
            resolve_image(url, &failures, ImageSlot::Thumbnail),
            ImageSource::Placeholder(THUMBNAIL_PLACEHOLDER),
            "{url:?}"
        );
    }
}

#[test]
fn failed_image_uses_placeholder_in_list_and_detail_alike() {
    let a = article();
    let mut failures = ImageFailures::default();

    let card = ArticleCard::new(&a, false, &failures);
    assert_eq!(card.image.uri(), "https://img.example.com/launch.jpg");
    assert!(!card.image.is_placeholder());

    failures.mark_failed("https://img.example.com/launch.jpg");
    let card = ArticleCard::new(&a, false, &failures);
    let detail = DetailView::new(&a, &failures);
    assert_eq!(card.image, ImageSource::Placeholder(THUMBNAIL_PLACEHOLDER));
    assert_eq!(detail.image, ImageSource::Placeholder(HERO_PLACEHOLDER));
}

#[test]
fn meta_line_falls_back_for_missing_site_and_date() {
    let bare = Article {
        news_site: None,
        published_at: None,
        ..article()
    };
    assert_eq!(meta_line(&bare, DateStyle::Short), "📰 Unknown • ");
    assert_eq!(meta_line(&bare, DateStyle::Long), "📰 Unknown • N/A");
}

#[test]
fn dates_are_formatted_or_passed_through() {
    let a = article();
    let short = format_published(&a, DateStyle::Short);
    assert_eq!(short.len(), "2024-10-21".len());
    assert!(short.starts_with("2024-10-2"));
    assert!(format_published(&a, DateStyle::Long).starts_with(&short[..8]));

    let odd = Article {
        published_at: Some("last tuesday".into()),
        ..article()
    };
    assert_eq!(format_published(&odd, DateStyle::Long), "last tuesday");
}

#[test]
fn detail_view_substitutes_missing_summary() {
    let a = Article {
        summary: String::new(),
        ..article()
    };
    let detail = DetailView::new(&a, &ImageFailures::default());
    assert_eq!(detail.summary, MISSING_SUMMARY);
    assert_eq!(detail.link_label, READ_MORE);
    assert_eq!(detail.link, a.url);
    assert!(detail.meta.starts_with("📰 NASA • "));
}

#[test]
fn card_key_is_the_url() {
    let a = article();
    let card = ArticleCard::new(&a, true, &ImageFailures::default());
    assert_eq!(card.key(), a.url);
    assert!(card.bookmarked);
}

#[test]
fn recorded_failure_switches_card_and_detail_to_placeholders() {
    let a = article();
    let mut failures = ImageFailures::default();
    let card = ArticleCard::new(&a, false, &failures);

    assert!(failures.record_failure(&card.image));
    assert!(!failures.record_failure(&card.image));
    assert!(failures.has_failed("https://img.example.com/launch.jpg"));

    assert_eq!(
        ArticleCard::new(&a, false, &failures).image,
        ImageSource::Placeholder(THUMBNAIL_PLACEHOLDER)
    );
    assert_eq!(
        DetailView::new(&a, &failures).image,
        ImageSource::Placeholder(HERO_PLACEHOLDER)
    );
}

#[test]
fn placeholder_failures_are_not_recorded() {
    let mut failures = ImageFailures::default();
    let placeholder = ImageSource::Placeholder(THUMBNAIL_PLACEHOLDER);
    assert!(!failures.record_failure(&placeholder));
    assert!(!failures.has_failed(THUMBNAIL_PLACEHOLDER));
}

#[test]
fn null_summary_decodes_as_missing() {
    let json = r#"{
        "id": 9,
        "title": "No summary",
        "summary": null,
        "image_url": null,
        "url": "https://news.example.com/none",
        "news_site": null,
        "published_at": null
    }"#;
    let a: Article = serde_json::from_str(json).unwrap();
    assert_eq!(a.summary, "");
    assert_eq!(DetailView::new(&a, &ImageFailures::default()).summary, MISSING_SUMMARY);

    let absent: Article =
        serde_json::from_str(r#"{"id": 9, "title": "t", "url": "https://news.example.com/x"}"#)
            .unwrap();
    assert_eq!(absent.summary, "");
}
