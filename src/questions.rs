//! Question banks
//!
//! Two fixed categories built from static reference data. Every call to
//! [`build_bank`] produces a freshly shuffled bank; nothing is cached.

use crate::answer::normalize;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of questions in one game
pub const GAME_LENGTH: usize = 10;

const COLOR_PROMPT: &str = "¿Cuál es este color?";
const ANIMAL_PROMPT: &str = "¿Cuál es el sonido de este animal?";

/// Static reference entry: a display name plus its category-specific asset
struct Reference {
    name: &'static str,
    asset: &'static str,
}

const COLORS: [Reference; 10] = [
    Reference { name: "Rojo", asset: "rgb(255, 0, 0)" },
    Reference { name: "Azul", asset: "rgb(0, 0, 255)" },
    Reference { name: "Blanco", asset: "rgb(255, 255, 255)" },
    Reference { name: "Negro", asset: "rgb(0, 0, 0)" },
    Reference { name: "Amarillo", asset: "rgb(255, 255, 0)" },
    Reference { name: "Naranja", asset: "rgb(255, 165, 0)" },
    Reference { name: "Gris", asset: "rgb(128, 128, 128)" },
    Reference { name: "Verde", asset: "rgb(0, 255, 0)" },
    Reference { name: "Celeste", asset: "rgb(173, 216, 230)" },
    Reference { name: "Morado", asset: "rgb(128, 0, 128)" },
];

const ANIMALS: [Reference; 10] = [
    Reference { name: "Gallina", asset: "soundbank://soundlibrary/animals/amzn_sfx_chicken_cluck_01" },
    Reference { name: "Gato", asset: "soundbank://soundlibrary/animals/amzn_sfx_cat_meow_1x_02" },
    Reference { name: "Perro", asset: "soundbank://soundlibrary/animals/amzn_sfx_dog_med_bark_2x_02" },
    Reference { name: "Cerdo", asset: "soundbank://soundlibrary/animals/amzn_sfx_pig_oink_01" },
    Reference { name: "Oveja", asset: "soundbank://soundlibrary/animals/amzn_sfx_sheep_bleat_03" },
    Reference { name: "Vaca", asset: "soundbank://soundlibrary/animals/amzn_sfx_cow_moo_01" },
    Reference { name: "Caballo", asset: "soundbank://soundlibrary/animals/amzn_sfx_horse_huff_whinny_01" },
    Reference { name: "Pato", asset: "soundbank://soundlibrary/animals/amzn_sfx_duck_quack_01" },
    Reference { name: "León", asset: "soundbank://soundlibrary/animals/amzn_sfx_lion_roar_03" },
    Reference { name: "Elefante", asset: "soundbank://soundlibrary/animals/amzn_sfx_elephant_01" },
];

// ============================================================================
// Category
// ============================================================================

/// Content category a game is played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Colores")]
    Colors,
    #[serde(rename = "Animales")]
    Animals,
}

impl Category {
    /// Name spoken to the user and sent to the results service
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Colors => "Colores",
            Category::Animals => "Animales",
        }
    }

    /// Parse a recognized slot value, ignoring case and accents
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize(token).as_str() {
            "colores" | "color" | "colors" => Some(Category::Colors),
            "animales" | "animal" | "animals" => Some(Category::Animals),
            _ => None,
        }
    }

    fn references(self) -> &'static [Reference] {
        match self {
            Category::Colors => &COLORS,
            Category::Animals => &ANIMALS,
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Category::Colors => COLOR_PROMPT,
            Category::Animals => ANIMAL_PROMPT,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Presentation
// ============================================================================

/// What the rendering layer should show or play for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Presentation {
    /// Full-screen background color with a headline
    Visual {
        background_color: String,
        headline: String,
    },
    /// Sound clip played to the user
    Audio { audio_asset: String },
}

// ============================================================================
// Bank entries and questions
// ============================================================================

/// One row of a category's bank before it is drawn as a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    #[allow(dead_code)] // Only read by tests
    pub category: Category,
    pub prompt: &'static str,
    /// Display form of the answer, e.g. "León"
    pub label: &'static str,
    /// Normalized answer, e.g. "leon"
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub presentation: Presentation,
}

/// A drawn question. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    label: String,
    correct_answer: String,
    options: Vec<String>,
    presentation: Presentation,
}

impl Question {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Correct answer first, then the distractors
    #[allow(dead_code)] // Only read by tests
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}

impl From<BankEntry> for Question {
    fn from(entry: BankEntry) -> Self {
        let mut options = Vec::with_capacity(entry.distractors.len() + 1);
        options.push(entry.correct_answer.clone());
        options.extend(entry.distractors);
        Self {
            prompt: entry.prompt.to_string(),
            label: entry.label.to_string(),
            correct_answer: entry.correct_answer,
            options,
            presentation: entry.presentation,
        }
    }
}

/// Unshuffled bank entries for a category, in reference order
pub fn bank_entries(category: Category) -> Vec<BankEntry> {
    let references = category.references();
    references
        .iter()
        .map(|reference| {
            let correct_answer = normalize(reference.name);
            let distractors = references
                .iter()
                .map(|other| normalize(other.name))
                .filter(|name| *name != correct_answer)
                .collect();
            let presentation = match category {
                Category::Colors => Presentation::Visual {
                    background_color: reference.asset.to_string(),
                    headline: category.prompt().to_string(),
                },
                Category::Animals => Presentation::Audio {
                    audio_asset: reference.asset.to_string(),
                },
            };
            BankEntry {
                category,
                prompt: category.prompt(),
                label: reference.name,
                correct_answer,
                distractors,
                presentation,
            }
        })
        .collect()
}

/// Build a freshly shuffled question bank for a category
pub fn build_bank(category: Category, rng: &mut dyn RngCore) -> Vec<Question> {
    let mut bank: Vec<Question> = bank_entries(category)
        .into_iter()
        .map(Question::from)
        .collect();
    bank.shuffle(rng);
    bank
}

/// Draw the questions for one game: the first [`GAME_LENGTH`] of a fresh bank
pub fn draw_game(category: Category, rng: &mut dyn RngCore) -> Vec<Question> {
    let mut bank = build_bank(category, rng);
    bank.truncate(GAME_LENGTH);
    bank
}
