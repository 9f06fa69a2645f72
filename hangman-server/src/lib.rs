use serde::Deserialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use crate::game_service::GameService;
use hangman_core::GameError;
use hangman_types::{GameId, GameStatus};

pub mod config;
pub mod game_service;
pub mod views;

#[derive(Deserialize)]
struct GuessForm {
    letter: Option<String>,
}

type BoxedReply = Box<dyn warp::Reply>;

pub fn create_routes(
    game_service: Arc<GameService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map({
        let game_service = game_service.clone();
        move || game_service.clone()
    });

    // Landing page
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(views::index_page()));

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let start_game = warp::path!("games")
        .and(warp::post())
        .and(service_filter.clone())
        .and_then(handle_start_game);

    let show_game = warp::path!("games" / GameId)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_show_game);

    let submit_guess = warp::path!("games" / GameId)
        .and(warp::post())
        .and(warp::body::content_length_limit(1024))
        .and(guess_form())
        .and(service_filter.clone())
        .and_then(handle_submit_guess);

    let game_result = warp::path!("games" / GameId / "result")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_game_result);

    // JSON view for scripted clients; never exposes the target word
    let game_state = warp::path!("games" / GameId / "state")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_game_state);

    let reset = warp::path!("reset")
        .and(warp::post())
        .and(service_filter.clone())
        .and_then(handle_reset);

    index
        .or(health)
        .or(start_game)
        .or(show_game)
        .or(submit_guess)
        .or(game_result)
        .or(game_state)
        .or(reset)
        .with(warp::log("hangman"))
}

/// Undecodable bodies count as an empty guess, which the engine ignores
fn guess_form() -> impl Filter<Extract = (GuessForm,), Error = std::convert::Infallible> + Clone {
    warp::body::form::<GuessForm>()
        .or(warp::any().map(|| GuessForm { letter: None }))
        .unify()
}

fn see_other(location: String) -> BoxedReply {
    Box::new(warp::reply::with_header(
        StatusCode::SEE_OTHER,
        "location",
        location,
    ))
}

fn error_status(err: &GameError) -> StatusCode {
    match err {
        GameError::GameNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(err: GameError) -> BoxedReply {
    let status = error_status(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", err);
    }

    let message = match err {
        GameError::GameNotFound { .. } => "Game not found.".to_string(),
        GameError::EmptyStore => "No words available.".to_string(),
        _ => "Something went wrong.".to_string(),
    };

    Box::new(warp::reply::with_status(
        warp::reply::html(views::error_page(status, &message)),
        status,
    ))
}

async fn handle_start_game(game_service: Arc<GameService>) -> Result<BoxedReply, warp::Rejection> {
    match game_service.start_game().await {
        Ok(game_id) => Ok(see_other(format!("/games/{game_id}"))),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_show_game(
    game_id: GameId,
    game_service: Arc<GameService>,
) -> Result<BoxedReply, warp::Rejection> {
    match game_service.game_view(game_id).await {
        Ok(view) if view.status.is_terminal() => Ok(see_other(format!("/games/{game_id}/result"))),
        Ok(view) => Ok(Box::new(warp::reply::html(views::game_page(&view)))),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_submit_guess(
    game_id: GameId,
    form: GuessForm,
    game_service: Arc<GameService>,
) -> Result<BoxedReply, warp::Rejection> {
    let input = form.letter.unwrap_or_default();

    match game_service.submit_guess(game_id, &input).await {
        Ok(outcome) if outcome.new_status.is_terminal() => {
            Ok(see_other(format!("/games/{game_id}/result")))
        }
        Ok(_) => Ok(see_other(format!("/games/{game_id}"))),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_game_result(
    game_id: GameId,
    game_service: Arc<GameService>,
) -> Result<BoxedReply, warp::Rejection> {
    match game_service.game_result(game_id).await {
        // The word stays hidden until the game is over
        Ok(result) if result.status == GameStatus::InProgress => {
            Ok(see_other(format!("/games/{game_id}")))
        }
        Ok(result) => Ok(Box::new(warp::reply::html(views::result_page(&result)))),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_game_state(
    game_id: GameId,
    game_service: Arc<GameService>,
) -> Result<BoxedReply, warp::Rejection> {
    match game_service.game_view(game_id).await {
        Ok(view) => Ok(Box::new(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        ))),
        Err(err) => {
            let status = error_status(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!("Failed to load state of game {}: {}", game_id, err);
            }
            Ok(Box::new(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": status.canonical_reason().unwrap_or("Error")
                })),
                status,
            )))
        }
    }
}

async fn handle_reset(game_service: Arc<GameService>) -> Result<BoxedReply, warp::Rejection> {
    match game_service.reset().await {
        Ok(word_count) => Ok(Box::new(warp::reply::html(views::reset_page(word_count)))),
        Err(err) => Ok(error_reply(err)),
    }
}
