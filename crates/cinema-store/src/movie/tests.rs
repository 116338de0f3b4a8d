use super::*;
use crate::testing::{Call, RecordingClient};
use chrono::NaiveDate;

fn dune() -> NewMovie {
    NewMovie {
        title: "Dune".into(),
        image: Some("dune.jpg".into()),
        category: Some("Sci-Fi".into()),
        release_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        duration: 166,
        director: Some("Denis Villeneuve".into()),
        casts: None,
        synopsis: Some("Spice.".into()),
        seller_id: Some(4),
    }
}

#[tokio::test]
async fn create_inserts_all_fields_and_stamps_created_at() {
    let client = RecordingClient::new();
    let repo = MovieRepo::new(&client);

    // The recording client returns no rows, so RETURNING comes back empty.
    let err = repo.create(dune()).await.unwrap_err();
    assert!(err.is_not_found());

    let call = client.single();
    assert_eq!(call.call, Call::QueryOne);
    assert_eq!(call.tag.as_deref(), Some("movies.create"));
    assert_eq!(
        call.sql,
        "INSERT INTO movies (title, image, category, release_date, duration, director, casts, \
         synopsis, seller_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
         RETURNING *"
    );
    assert_eq!(
        call.params,
        vec![
            r#""Dune""#,
            r#"Some("dune.jpg")"#,
            r#"Some("Sci-Fi")"#,
            "2024-03-01",
            "166",
            r#"Some("Denis Villeneuve")"#,
            "None",
            r#"Some("Spice.")"#,
            "Some(4)",
        ]
    );
}

#[tokio::test]
async fn list_defaults_to_first_page_of_ten_by_title() {
    let client = RecordingClient::new();
    let rows = MovieRepo::new(&client).list(&MovieQuery::new()).await.unwrap();
    assert!(rows.is_empty());

    let call = client.single();
    assert_eq!(call.tag.as_deref(), Some("movies.list"));
    assert!(call.sql.starts_with("SELECT m.title, m.image AS movies_image"));
    assert!(call.sql.contains(
        " FROM movies m JOIN cinemas c ON c.movies_id = m.id JOIN \"time\" t ON t.cinemas_id = c.id"
    ));
    assert!(!call.sql.contains("WHERE"));
    assert!(call.sql.ends_with(" ORDER BY m.title ASC LIMIT $1 OFFSET $2"));
    assert_eq!(call.params, vec!["10", "0"]);
}

#[tokio::test]
async fn list_binds_limit_and_offset_for_later_pages() {
    let client = RecordingClient::new();
    let query = MovieQuery::new().limit(5).page(3);
    MovieRepo::new(&client).list(&query).await.unwrap();

    assert_eq!(client.single().params, vec!["5", "10"]);
}

#[tokio::test]
async fn list_sort_orders() {
    let cases = [
        (MovieSort::NameDesc, " ORDER BY m.title DESC"),
        (MovieSort::ReleaseAsc, " ORDER BY m.release_date ASC"),
        (MovieSort::ReleaseDesc, " ORDER BY m.release_date DESC"),
        (MovieSort::DurationAsc, " ORDER BY m.duration ASC"),
        (MovieSort::DurationDesc, " ORDER BY m.duration DESC"),
        (MovieSort::parse("unknown"), " ORDER BY m.title ASC"),
    ];
    for (sort, order_by) in cases {
        let client = RecordingClient::new();
        MovieRepo::new(&client)
            .list(&MovieQuery::new().sort(sort))
            .await
            .unwrap();
        let sql = client.single().sql;
        assert!(
            sql.ends_with(&format!("{order_by} LIMIT $1 OFFSET $2")),
            "{sort:?}: {sql}"
        );
    }
}

#[tokio::test]
async fn list_now_filter_compares_against_today() {
    let client = RecordingClient::new();
    MovieRepo::new(&client)
        .list(&MovieQuery::new().show(ShowFilter::Now))
        .await
        .unwrap();

    let call = client.single();
    assert!(call.sql.contains(" WHERE t.show_date <= now() ORDER BY"));
    assert_eq!(call.params, vec!["10", "0"]);
}

#[tokio::test]
async fn list_month_filter_binds_month_and_year() {
    let client = RecordingClient::new();
    let query = MovieQuery::new().show("2024-03".parse().unwrap());
    MovieRepo::new(&client).list(&query).await.unwrap();

    let call = client.single();
    assert!(call.sql.contains(
        " WHERE date_part('month', t.show_date)::int = $1 AND date_part('year', t.show_date)::int = $2"
    ));
    assert!(call.sql.ends_with("LIMIT $3 OFFSET $4"));
    assert!(!call.sql.contains("2024"));
    assert_eq!(call.params, vec!["3", "2024", "10", "0"]);
}

#[tokio::test]
async fn list_rejects_bad_paging_without_querying() {
    let client = RecordingClient::new();
    let repo = MovieRepo::new(&client);

    let err = repo.list(&MovieQuery::new().limit(0)).await.unwrap_err();
    assert!(err.is_invalid_request());
    let err = repo.list(&MovieQuery::new().page(0)).await.unwrap_err();
    assert!(err.is_invalid_request());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn list_and_meta_reject_offset_overflow_without_querying() {
    let client = RecordingClient::new();
    let repo = MovieRepo::new(&client);
    let query = MovieQuery::new().limit(i64::MAX).page(3);

    assert!(repo.list(&query).await.unwrap_err().is_invalid_request());
    assert!(repo.meta(&query).await.unwrap_err().is_invalid_request());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn list_with_huge_limit_on_first_page_binds_zero_offset() {
    let client = RecordingClient::new();
    MovieRepo::new(&client)
        .list(&MovieQuery::new().limit(i64::MAX))
        .await
        .unwrap();
    assert_eq!(client.single().params, vec![i64::MAX.to_string(), "0".to_string()]);
}

#[tokio::test]
async fn meta_counts_with_filter_params_only() {
    let client = RecordingClient::new();
    let query = MovieQuery::new()
        .show(ShowFilter::Month { year: 2023, month: 11 })
        .limit(20)
        .page(2);

    // No count row comes back from the recording client.
    let _ = MovieRepo::new(&client).meta(&query).await;

    let call = client.single();
    assert_eq!(call.call, Call::QueryOne);
    assert_eq!(call.tag.as_deref(), Some("movies.meta"));
    assert!(call.sql.starts_with("SELECT count(*) AS total_movies FROM movies m JOIN cinemas c"));
    assert!(!call.sql.contains("LIMIT"));
    assert!(!call.sql.contains("ORDER BY"));
    assert_eq!(call.params, vec!["11", "2023"]);
}

#[tokio::test]
async fn meta_without_filter_binds_nothing() {
    let client = RecordingClient::new();
    let _ = MovieRepo::new(&client).meta(&MovieQuery::new()).await;
    assert!(client.single().params.is_empty());
}

#[tokio::test]
async fn meta_rejects_bad_paging_without_querying() {
    let client = RecordingClient::new();
    let err = MovieRepo::new(&client)
        .meta(&MovieQuery::new().limit(-1))
        .await
        .unwrap_err();
    assert!(err.is_invalid_request());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn list_page_issues_list_then_count() {
    let client = RecordingClient::new();
    let _ = MovieRepo::new(&client)
        .list_page(&MovieQuery::new().show(ShowFilter::Now))
        .await;

    let tags: Vec<_> = client.calls().into_iter().filter_map(|c| c.tag).collect();
    assert_eq!(tags, vec!["movies.list", "movies.meta"]);
}

#[tokio::test]
async fn get_one_missing_is_none() {
    let client = RecordingClient::new();
    let movie = MovieRepo::new(&client).get_one(7).await.unwrap();
    assert!(movie.is_none());

    let call = client.single();
    assert_eq!(call.call, Call::QueryOpt);
    assert_eq!(call.sql, "SELECT * FROM movies WHERE id = $1");
    assert_eq!(call.params, vec!["7"]);
}

#[tokio::test]
async fn get_showing_takes_no_params() {
    let client = RecordingClient::new();
    let movies = MovieRepo::new(&client).get_showing().await.unwrap();
    assert!(movies.is_empty());

    let call = client.single();
    assert_eq!(call.tag.as_deref(), Some("movies.showing"));
    assert_eq!(call.sql, "SELECT * FROM movies WHERE release_date <= now()");
    assert!(call.params.is_empty());
}

#[tokio::test]
async fn update_single_field() {
    let client = RecordingClient::new();
    let patch = MoviePatch {
        duration: Some(120),
        ..Default::default()
    };
    let updated = MovieRepo::new(&client).update(patch, 5).await.unwrap();
    assert!(updated.is_none());

    let call = client.single();
    assert_eq!(call.tag.as_deref(), Some("movies.update"));
    assert_eq!(
        call.sql,
        "UPDATE movies SET duration = $1 WHERE id = $2 RETURNING *"
    );
    assert_eq!(call.params, vec!["120", "5"]);
}

#[tokio::test]
async fn update_keeps_column_order_and_id_last() {
    let client = RecordingClient::new();
    let patch = MoviePatch {
        synopsis: Some(String::new()),
        title: Some("Dune: Part Two".into()),
        release_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        ..Default::default()
    };
    MovieRepo::new(&client).update(patch, 11).await.unwrap();

    let call = client.single();
    assert_eq!(
        call.sql,
        "UPDATE movies SET title = $1, release_date = $2, synopsis = $3 WHERE id = $4 RETURNING *"
    );
    assert_eq!(
        call.params,
        vec![r#""Dune: Part Two""#, "2024-03-01", r#""""#, "11"]
    );
}

#[tokio::test]
async fn update_with_empty_patch_is_rejected_without_querying() {
    let client = RecordingClient::new();
    let err = MovieRepo::new(&client)
        .update(MoviePatch::default(), 5)
        .await
        .unwrap_err();
    assert!(err.is_invalid_request());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn delete_reports_affected_rows() {
    let client = RecordingClient::affecting(1);
    let deleted = MovieRepo::new(&client).delete(3).await.unwrap();
    assert_eq!(deleted, 1);

    let call = client.single();
    assert_eq!(call.call, Call::Execute);
    assert_eq!(call.tag.as_deref(), Some("movies.delete"));
    assert_eq!(call.sql, "DELETE FROM movies WHERE id = $1");
    assert_eq!(call.params, vec!["3"]);
}

#[tokio::test]
async fn store_failures_propagate_unchanged() {
    let client = RecordingClient::failing();
    let err = MovieRepo::new(&client).get_one(1).await.unwrap_err();
    assert!(matches!(err, crate::StoreError::Connection(_)));
}

#[test]
fn patch_accepts_name_as_title() {
    let patch: MoviePatch =
        serde_json::from_str(r#"{"name":"Arrival","releaseDate":"2016-11-11"}"#).unwrap();
    assert_eq!(patch.title.as_deref(), Some("Arrival"));
    assert_eq!(patch.release_date, NaiveDate::from_ymd_opt(2016, 11, 11));
    assert!(!patch.is_empty());
    assert!(MoviePatch::default().is_empty());
}

#[test]
fn new_movie_deserializes_camel_case() {
    let movie: NewMovie = serde_json::from_str(
        r#"{"title":"Arrival","releaseDate":"2016-11-11","duration":116,"sellerId":2}"#,
    )
    .unwrap();
    assert_eq!(movie.seller_id, Some(2));
    assert_eq!(movie.duration, 116);
    assert_eq!(movie.image, None);
}
