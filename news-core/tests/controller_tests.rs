use news_core::view::{
    ImageFailures, ImageSource, BOOKMARKS_EMPTY, BOOKMARKS_HEADER, HOME_EMPTY, HOME_HEADER,
    THUMBNAIL_PLACEHOLDER,
};
use news_core::{
    Article, BookmarkPersistence, BookmarkStore, BookmarksController, FeedClient, HomeController,
    LoadOutcome, MemoryStore, ScreenPhase,
};
use reqwest::Client;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article(url: &str) -> Article {
    Article {
        id: 1,
        title: format!("Title for {url}"),
        summary: String::new(),
        image_url: None,
        url: url.into(),
        news_site: None,
        published_at: None,
    }
}

async fn feed_server(results: &[Article]) -> MockServer {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    });
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> FeedClient {
    let endpoint = Url::parse(&format!("{}/articles", server.uri())).unwrap();
    FeedClient::new(Client::new(), endpoint)
}

fn unreachable_client() -> FeedClient {
    FeedClient::new(
        Client::new(),
        Url::parse("http://127.0.0.1:1/articles").unwrap(),
    )
}

#[tokio::test]
async fn home_mount_loads_snapshot_and_settles_ready() {
    let server = feed_server(&[article("a"), article("b")]).await;
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(client_for(&server), store);

    assert_eq!(home.phase(), ScreenPhase::Idle);
    home.mount().await;
    assert_eq!(home.phase(), ScreenPhase::Ready);
    assert!(!home.fetch_failed());
    assert_eq!(home.articles().len(), 2);
}

#[tokio::test]
async fn home_toggle_scenario_persists_bookmark() {
    let server = feed_server(&[article("a"), article("b")]).await;
    let kv = MemoryStore::in_memory();
    let store = BookmarkStore::new(BookmarkPersistence::new(kv.clone()));
    let mut home = HomeController::new(client_for(&server), store);
    home.mount().await;
    home.on_focus().await.unwrap();

    let a = home.articles()[0].clone();
    assert!(!home.is_bookmarked(&a).await);
    assert!(home.toggle_bookmark(&a).await.unwrap());
    assert!(home.is_bookmarked(&a).await);

    let persisted = BookmarkPersistence::new(kv).load().await.into_articles();
    assert_eq!(persisted, vec![article("a")]);
}

#[tokio::test]
async fn failed_fetch_is_ready_and_renders_the_empty_state() {
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(unreachable_client(), store);

    home.mount().await;
    assert_eq!(home.phase(), ScreenPhase::Ready);
    assert!(home.fetch_failed());

    let view = home.list_view(&ImageFailures::default()).await;
    assert!(view.is_empty());
    assert_eq!(view.header, HOME_HEADER);
    assert_eq!(view.empty, HOME_EMPTY);
    assert_eq!(view.visible_header(), Some(HOME_HEADER));
}

#[tokio::test]
async fn loading_can_be_split_around_a_background_fetch() {
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(unreachable_client(), store);

    home.begin_loading();
    assert_eq!(home.phase(), ScreenPhase::Loading);
    home.finish_loading(LoadOutcome::Loaded(Vec::new()));
    assert_eq!(home.phase(), ScreenPhase::Ready);
    assert!(!home.fetch_failed());
    assert!(home.articles().is_empty());
}

#[tokio::test]
async fn home_cards_reflect_bookmark_state() {
    let server = feed_server(&[article("a"), article("b")]).await;
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(client_for(&server), store);
    home.mount().await;
    home.toggle_bookmark(&article("b")).await.unwrap();

    let view = home.list_view(&ImageFailures::default()).await;
    let flags: Vec<(&str, bool)> = view.cards.iter().map(|c| (c.key(), c.bookmarked)).collect();
    assert_eq!(flags, vec![("a", false), ("b", true)]);
}

#[tokio::test]
async fn bookmarks_screen_remove_scenario() {
    let kv = MemoryStore::in_memory();
    BookmarkPersistence::new(kv.clone())
        .save(&[article("u1"), article("u2")])
        .await
        .unwrap();
    let screen = BookmarksController::new(BookmarkStore::new(BookmarkPersistence::new(kv.clone())));

    assert_eq!(screen.on_focus().await.unwrap(), 2);
    assert!(screen.remove_bookmark(&article("u1")).await.unwrap());

    assert_eq!(screen.bookmarks().await, vec![article("u2")]);
    let persisted = BookmarkPersistence::new(kv).load().await.into_articles();
    assert_eq!(persisted, vec![article("u2")]);
}

#[tokio::test]
async fn bookmark_added_on_home_shows_on_bookmarks_screen() {
    let server = feed_server(&[article("a")]).await;
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(client_for(&server), store.clone());
    let saved = BookmarksController::new(store);

    home.mount().await;
    let empty = saved.list_view(&ImageFailures::default()).await;
    assert!(empty.is_empty());
    assert_eq!(empty.empty, BOOKMARKS_EMPTY);

    home.toggle_bookmark(&article("a")).await.unwrap();
    let view = saved.list_view(&ImageFailures::default()).await;
    assert_eq!(view.cards.len(), 1);
    assert!(view.cards[0].bookmarked);

    saved.remove_bookmark(&article("a")).await.unwrap();
    assert!(!home.is_bookmarked(&article("a")).await);
}

#[tokio::test]
async fn empty_bookmarks_screen_shows_only_the_call_to_action() {
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let saved = BookmarksController::new(store.clone());

    let view = saved.list_view(&ImageFailures::default()).await;
    assert!(view.is_empty());
    assert_eq!(view.visible_header(), None);
    assert_eq!(view.empty.action, Some("Browse News"));

    store.toggle(&article("a")).await.unwrap();
    let view = saved.list_view(&ImageFailures::default()).await;
    assert_eq!(view.visible_header(), Some(BOOKMARKS_HEADER));
}

#[tokio::test]
async fn failed_thumbnail_is_replaced_on_the_next_list_view() {
    let pictured = Article {
        image_url: Some("https://img.example.com/broken.jpg".into()),
        ..article("a")
    };
    let server = feed_server(&[pictured]).await;
    let store = BookmarkStore::new(BookmarkPersistence::new(MemoryStore::in_memory()));
    let mut home = HomeController::new(client_for(&server), store);
    home.mount().await;

    let mut failures = ImageFailures::default();
    let first = home.list_view(&failures).await;
    assert_eq!(
        first.cards[0].image,
        ImageSource::Remote("https://img.example.com/broken.jpg".into())
    );

    assert!(failures.record_failure(&first.cards[0].image));
    let second = home.list_view(&failures).await;
    assert_eq!(
        second.cards[0].image,
        ImageSource::Placeholder(THUMBNAIL_PLACEHOLDER)
    );
}
