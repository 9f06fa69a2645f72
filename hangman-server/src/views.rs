use hangman_types::{GameResult, GameStatus, GameView};
use warp::http::StatusCode;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn index_page() -> String {
    layout(
        "Hangman",
        "<h1>Hangman</h1>\n\
         <form method=\"post\" action=\"/games\"><button type=\"submit\">New game</button></form>\n\
         <form method=\"post\" action=\"/reset\"><button type=\"submit\">Reset</button></form>",
    )
}

/// Spaced pattern so placeholders stay distinguishable
pub fn display_pattern(pattern: &str) -> String {
    pattern
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn game_page(view: &GameView) -> String {
    let buttons: String = view
        .remaining_letters
        .iter()
        .map(|letter| {
            format!(
                "<button type=\"submit\" name=\"letter\" value=\"{letter}\">{letter}</button>"
            )
        })
        .collect();

    let guessed: String = view.guessed_letters.iter().collect();

    let body = format!(
        "<h1>Game {id}</h1>\n\
         <p class=\"pattern\">{pattern}</p>\n\
         <p class=\"failures\">Failures: {failures} / {max}</p>\n\
         <p class=\"guessed\">Guessed: {guessed}</p>\n\
         <form method=\"post\" action=\"/games/{id}\">{buttons}</form>\n\
         <form method=\"post\" action=\"/games/{id}\">\
         <input name=\"letter\" maxlength=\"1\" autofocus><button type=\"submit\">Guess</button></form>",
        id = view.game_id,
        pattern = escape(&display_pattern(&view.revealed_pattern)),
        failures = view.failure_count,
        max = view.max_attempts,
        guessed = escape(&guessed),
        buttons = buttons,
    );

    layout("Hangman", &body)
}

pub fn result_page(result: &GameResult) -> String {
    let headline = match result.status {
        GameStatus::Won => "You won!",
        GameStatus::Lost => "You lost.",
        GameStatus::InProgress => "Game in progress",
    };

    let body = format!(
        "<h1>{headline}</h1>\n\
         <p class=\"word\">The word was <strong>{word}</strong></p>\n\
         <p class=\"failures\">Failures: {failures} / {max}</p>\n\
         <form method=\"post\" action=\"/games\"><button type=\"submit\">Play again</button></form>",
        headline = headline,
        word = escape(&result.word),
        failures = result.failure_count,
        max = result.max_attempts,
    );

    layout("Hangman", &body)
}

pub fn reset_page(word_count: u64) -> String {
    layout(
        "Hangman",
        &format!(
            "<h1>Game reset</h1>\n<p>All games were removed and {word_count} words were restored.</p>\n\
             <p><a href=\"/\">Back</a></p>"
        ),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>",
            status.as_u16(),
            escape(message)
        ),
    )
}
