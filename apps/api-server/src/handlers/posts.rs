//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use posts_shared::PostPayload;

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    tracing::info!(title = %body.title, "Received request to create post");
    let created = state.posts.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts
pub async fn get_all_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.get_all().await?))
}

/// GET /api/posts/author/name/{author}
pub async fn get_posts_by_author(
    state: web::Data<AppState>,
    author: web::Path<String>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.get_by_author(&author).await?))
}

/// GET /api/posts/published
pub async fn get_published_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.get_published().await?))
}

/// GET /api/posts/tag/{tag}
pub async fn get_posts_by_tag(
    state: web::Data<AppState>,
    tag: web::Path<String>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.get_by_tag(&tag).await?))
}

/// GET /api/posts/search?keyword=
pub async fn search_posts(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.search(&params.keyword).await?))
}

/// GET /api/posts/tags
pub async fn get_all_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.get_all_tag_names().await?))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let updated = state
        .posts
        .update(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    tracing::warn!(id, "Received request to delete post");
    state.posts.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/author/{author}
pub async fn delete_posts_by_author(
    state: web::Data<AppState>,
    author: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete_by_author(&author).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/posts/{id}/publish
pub async fn publish_post(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.publish(id.into_inner()).await?))
}

/// PUT /api/posts/{id}/unpublish
pub async fn unpublish_post(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.unpublish(id.into_inner()).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn body(title: &str, author: &str, tags: &[&str]) -> Value {
        json!({
            "title": title,
            "excerpt": "short",
            "content": format!("{title} content"),
            "author": author,
            "tags": tags,
        })
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body("Hello", "ann", &["Java", "Spring"]))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["tags"], json!(["Java", "Spring"]));
        assert_eq!(created["isPublished"], false);

        let id = created["id"].as_i64().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["title"], "Hello");
        assert_eq!(fetched["excerpt"], "short");
    }

    #[actix_web::test]
    async fn test_missing_post_is_plain_404() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/posts/41").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let text = test::read_body(res).await;
        assert_eq!(text, "Post not found with id: 41");

        for uri in ["/api/posts/41/publish", "/api/posts/41/unpublish", "/api/posts/41"] {
            let req = test::TestRequest::put()
                .uri(uri)
                .set_json(body("t", "a", &[]))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let req = test::TestRequest::delete().uri("/api/posts/41").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_literal_routes_win_over_id() {
        let app = app!();

        for title in ["java intro", "rust intro"] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(body(title, "ann", &["lang"]))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/posts/tags").to_request();
        let tags: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tags, json!(["lang"]));

        let req = test::TestRequest::get().uri("/api/posts/published").to_request();
        let published: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(published, json!([]));

        let req = test::TestRequest::get()
            .uri("/api/posts/search?keyword=java")
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["title"], "java intro");

        let req = test::TestRequest::get().uri("/api/posts/tag/lang").to_request();
        let tagged: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tagged[0]["title"], "rust intro");
        assert_eq!(tagged[1]["title"], "java intro");
    }

    #[actix_web::test]
    async fn test_publish_cycle_and_author_routes() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body("t", "ann", &[]))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}/publish"))
            .to_request();
        let published: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(published["isPublished"], true);
        assert!(published["publishedAt"].is_string());

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}/unpublish"))
            .to_request();
        let unpublished: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unpublished["isPublished"], false);
        assert!(unpublished["publishedAt"].is_null());

        let req = test::TestRequest::get()
            .uri("/api/posts/author/name/ann")
            .to_request();
        let by_author: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(by_author.as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete()
            .uri("/api/posts/author/nobody")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri("/api/posts/author/ann")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all, json!([]));
    }

    #[actix_web::test]
    async fn test_update_without_tags_keeps_them() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body("t", "ann", &["keep"]))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .set_json(json!({"title": "new", "content": "c", "author": "ann"}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "new");
        assert_eq!(updated["tags"], json!(["keep"]));
        assert!(updated["excerpt"].is_null());
    }

    #[actix_web::test]
    async fn test_bad_input_is_400() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "no content or author"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/posts/search").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
