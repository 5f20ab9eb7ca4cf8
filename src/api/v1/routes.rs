/*
 * Responsibility
 * - v1 URL structure: the public surface and the session-protected surface
 * - Auth is a route_layer on the protected group only, so it runs after
 *   routing and never for public endpoints
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    accounts, articles, auth, comments, health, karma, search, subreddits,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/ping", get(health::ping))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/article", get(articles::list_articles))
        .route("/article/{id}", get(articles::get_article))
        .route("/comment", get(comments::list_comments))
        .route("/comment/{id}", get(comments::get_comment))
        .route("/user/{username}", get(accounts::get_profile))
        .route("/subreddit", get(subreddits::list_subreddits))
        .route("/subreddit/{name}", get(subreddits::get_subreddit))
        .route("/trending", get(subreddits::trending))
        .route("/search", get(search::search));

    let protected = Router::new()
        .route("/article", post(articles::new_article))
        .route(
            "/article/{id}",
            put(articles::modify_article).delete(articles::delete_article),
        )
        .route("/comment", post(comments::new_comment))
        .route(
            "/comment/{id}",
            put(comments::modify_comment).delete(comments::delete_comment),
        )
        .route("/me/bio", put(accounts::modify_bio))
        .route(
            "/me/save/{article_id}",
            get(accounts::saved_state)
                .post(accounts::save_article)
                .delete(accounts::unsave_article),
        )
        .route(
            "/me/join/{subreddit}",
            get(accounts::joined_state)
                .post(accounts::join_subreddit)
                .delete(accounts::leave_subreddit),
        )
        .route("/subreddit", post(subreddits::new_subreddit))
        .route("/me/karma/article/{id}", get(karma::get_article_vote))
        .route("/me/karma/comment/{id}", get(karma::get_comment_vote))
        .route("/karma/article/{id}", post(karma::vote_article))
        .route("/karma/comment/{id}", post(karma::vote_comment));

    let protected = middleware::auth::apply(protected, state);

    public.merge(protected)
}
