//! Spoken text for quiz replies

use crate::questions::Category;

pub const WELCOME: &str =
    "¡Bienvenido! Soy tu asistente de juego. Di \"comenzar juego\" para iniciar una nueva partida.";
pub const WELCOME_REPROMPT: &str = "Para comenzar una nueva partida, di \"comenzar juego\".";

pub const ASK_NAME: &str = "Antes de comenzar, por favor, dime tu nombre.";
pub const ASK_NAME_REPROMPT: &str = "Por favor, dime tu nombre para continuar.";
pub const NAME_NOT_CAPTURED: &str = "Lo siento, no pude capturar tu nombre. ¿Puedes repetirlo?";
pub const NAME_NOT_CAPTURED_REPROMPT: &str = "Por favor, di tu nombre para continuar.";

pub const ASK_CATEGORY: &str =
    "¿En qué categoría quieres jugar? Puedes elegir entre Colores y Animales.";
pub const ASK_CATEGORY_REPROMPT: &str =
    "¿En qué categoría quieres jugar? Di \"Colores\" o \"Animales\".";

pub const ANSWER_REPROMPT: &str = "¿Cuál es tu respuesta?";
pub const ANSWER_NOT_HEARD: &str = "No escuché tu respuesta. ¿Cuál es tu respuesta?";

pub const CORRECT: &str = "¡Correcto!";
pub const INCORRECT: &str = "¡Incorrecto!";

pub const NO_GAME_IN_PROGRESS: &str =
    "No hay ningún juego en curso. Di \"comenzar juego\" para iniciar una nueva partida.";

pub const NO_CURRENT_QUESTION: &str = "Hubo un problema con la pregunta actual.";
pub const APOLOGY: &str = "Lo siento, hubo un problema. Por favor, inténtalo de nuevo.";

/// Encouragement after the first and second miss on a question
const ATTEMPT_MESSAGES: [&str; 2] = [
    "Casi lo logras, inténtalo nuevamente.",
    "Estás muy cerca, inténtalo nuevamente.",
];

pub fn greet_and_ask_category(name: &str) -> String {
    format!("¡Hola, {name}! {ASK_CATEGORY}")
}

pub fn game_started(name: &str, category: Category, prompt: &str) -> String {
    format!(
        "¡Bienvenido, {name}! Iniciando nuevo juego en la categoría {category}. Primera pregunta: {prompt}"
    )
}

pub fn next_question(lead: &str, prompt: &str) -> String {
    format!("{lead} Siguiente pregunta: {prompt}")
}

pub fn reveal(label: &str) -> String {
    format!("{INCORRECT} La respuesta correcta es: {label}.")
}

pub fn wrong_attempt(attempt: u8) -> String {
    let index = usize::from(attempt.clamp(1, 2)) - 1;
    format!("{INCORRECT} {}", ATTEMPT_MESSAGES[index])
}

pub fn final_score(lead: Option<&str>, score: u32) -> String {
    let summary = format!("¡Juego completado! Tu puntuación final es {score}. ¡Gracias por jugar!");
    match lead {
        Some(lead) => format!("{lead} {summary}"),
        None => summary,
    }
}

pub fn repeat_question(prompt: &str) -> String {
    format!("Pregunta: {prompt} {ANSWER_REPROMPT}")
}
