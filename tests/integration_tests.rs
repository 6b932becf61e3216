use link_cleaner::cleaner::{self, ParseError};
use link_cleaner::db::{Db, TOTAL_PARAMS_REMOVED};

fn sqlite_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite:{}?mode=rwc", dir.path().join("stats.db").display())
}

#[test]
fn cleans_real_world_shapes() {
    let amazon = cleaner::clean("https://www.amazon.com/dp/B08N5WRWNW?tag=deals-20&ascsubtag=xyz&th=1")
        .unwrap();
    assert_eq!(amazon.cleaned, "https://www.amazon.com/dp/B08N5WRWNW?th=1");
    assert_eq!(amazon.removed_count, 2);

    let youtube = cleaner::clean("https://www.youtube.com/watch?v=abc123&si=tracker").unwrap();
    assert_eq!(youtube.cleaned, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(youtube.removed_count, 1);

    let search = cleaner::clean("https://www.google.com/search?q=rust+url+crate&ei=XYZ&ved=123")
        .unwrap();
    assert_eq!(search.cleaned, "https://www.google.com/search?q=rust+url+crate");
    assert_eq!(search.removed_count, 2);
}

#[test]
fn original_is_echoed_verbatim() {
    let input = "https://example.com/page?UTM_Source=newsletter&id=42";
    let result = cleaner::clean(input).unwrap();
    assert_eq!(result.original, input);
    assert_eq!(result.cleaned, "https://example.com/page?id=42");
}

#[test]
fn cleaned_output_is_stable_under_recleaning() {
    let first = cleaner::clean(
        "https://shop.example.com/item?utm_campaign=sale&sku=99&fbclid=x&color=red%20wine",
    )
    .unwrap();
    let second = cleaner::clean(&first.cleaned).unwrap();

    assert_eq!(second.removed_count, 0);
    assert_eq!(second.cleaned, first.cleaned);
}

#[test]
fn whitespace_only_input_is_rejected() {
    assert_eq!(cleaner::clean("   "), Err(ParseError::InvalidFormat));
    assert_eq!(cleaner::clean("\t\n"), Err(ParseError::InvalidFormat));
}

#[test]
fn result_serializes_for_json_output() {
    let result = cleaner::clean("https://example.com/?gclid=1&id=2").unwrap();
    let line = serde_json::to_string(&result).unwrap();

    let parsed: link_cleaner::models::CleanResult = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed, result);
}

#[tokio::test]
async fn unseen_counter_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::new(&sqlite_url(&dir)).await.unwrap();

    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 0);
}

#[tokio::test]
async fn counter_accumulates_removed_params() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::new(&sqlite_url(&dir)).await.unwrap();

    for input in [
        "https://example.com/page?utm_source=newsletter&id=42",
        "https://example.com/?fbclid=abc&gclid=def",
        "https://example.com/path",
    ] {
        let result = cleaner::clean(input).unwrap();
        db.increment_counter(TOTAL_PARAMS_REMOVED, result.removed_count as i64)
            .await
            .unwrap();
    }

    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 3);
}

#[tokio::test]
async fn counter_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = sqlite_url(&dir);

    {
        let db = Db::new(&url).await.unwrap();
        db.increment_counter(TOTAL_PARAMS_REMOVED, 5).await.unwrap();
    }

    let db = Db::new(&url).await.unwrap();
    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 5);

    db.increment_counter(TOTAL_PARAMS_REMOVED, 2).await.unwrap();
    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 7);
}

#[tokio::test]
async fn set_counter_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::new(&sqlite_url(&dir)).await.unwrap();

    db.increment_counter(TOTAL_PARAMS_REMOVED, 9).await.unwrap();
    db.set_counter(TOTAL_PARAMS_REMOVED, 0).await.unwrap();

    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 0);
}

#[tokio::test]
async fn counters_are_independent_slots() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::new(&sqlite_url(&dir)).await.unwrap();

    db.increment_counter(TOTAL_PARAMS_REMOVED, 4).await.unwrap();
    db.increment_counter("somethingElse", 11).await.unwrap();

    assert_eq!(db.get_counter(TOTAL_PARAMS_REMOVED).await.unwrap(), 4);
    assert_eq!(db.get_counter("somethingElse").await.unwrap(), 11);
}
